//! Shared fixtures and cross-product parser tests

pub mod fixtures;
