//! Line classification for fixed-width products
//!
//! Sentinels are checked before data patterns, since header and trailer
//! lines would otherwise satisfy the loose data-line patterns.

use crate::constants::TRAILER_SENTINEL;
use crate::models::Product;
use regex::bytes::Regex;
use std::sync::LazyLock;

static COMPANY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8}1").expect("valid company line pattern"));

static GAZETTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8}\d{3}").expect("valid gazette line pattern"));

static UPDATE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8}\d{10}").expect("valid update line pattern"));

static OFFICER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8}[12]").expect("valid officer line pattern"));

/// Classification of one raw line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Trailer,
    Company,
    Transaction,
    Person,
    Unknown,
}

impl LineKind {
    /// Whether the line carries record data
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            LineKind::Company | LineKind::Transaction | LineKind::Person
        )
    }
}

/// Classify a raw line for the given product
pub fn classify_line(product: Product, line: &[u8]) -> LineKind {
    if let Some(sentinel) = product.header_sentinel() {
        if line.starts_with(sentinel.as_bytes()) {
            return LineKind::Header;
        }
    }
    if line.starts_with(TRAILER_SENTINEL.as_bytes()) {
        return LineKind::Trailer;
    }

    match product {
        Product::Prod183 if COMPANY_LINE.is_match(line) => LineKind::Company,
        Product::Prod100 if GAZETTE_LINE.is_match(line) => LineKind::Transaction,
        Product::Prod101 if UPDATE_LINE.is_match(line) => LineKind::Transaction,
        Product::Prod216 if OFFICER_LINE.is_match(line) => match line[8] {
            b'1' => LineKind::Company,
            _ => LineKind::Person,
        },
        _ => LineKind::Unknown,
    }
}
