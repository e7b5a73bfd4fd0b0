//! Shared helpers for the integration tests
//!
//! Writes small product files at their published byte offsets into a
//! temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Space-filled line with positional writes
pub struct Line(Vec<u8>);

impl Line {
    pub fn new() -> Self {
        Line(Vec::new())
    }

    pub fn put(mut self, offset: usize, value: &str) -> Self {
        let end = offset + value.len();
        if self.0.len() < end {
            self.0.resize(end, b' ');
        }
        self.0[offset..end].copy_from_slice(value.as_bytes());
        self
    }

    pub fn pad_to(mut self, len: usize) -> Self {
        if self.0.len() < len {
            self.0.resize(len, b' ');
        }
        self
    }

    pub fn append(mut self, value: &str) -> Self {
        self.0.extend_from_slice(value.as_bytes());
        self
    }

    pub fn into_string(self) -> String {
        String::from_utf8(self.0).unwrap()
    }
}

pub fn header(date: &str) -> String {
    format!("AAAAAAAA0001{}", date)
}

pub fn trailer(count: usize) -> String {
    format!("99999999{:08}", count)
}

/// Product 183 company line: status, reference date and a registered office
pub fn company_line(number: &str, status: &str, name: &str) -> String {
    Line::new()
        .put(0, number)
        .put(8, "1")
        .put(9, status)
        .put(12, "19800101")
        .put(28, "31")
        .put(30, "03")
        .put(64, "62012")
        .put(90, name)
        .put(310, "1")
        .pad_to(311)
        .append("1<HIGH STREET<<LEEDS<<<LS1 4AB<<<")
        .into_string()
}

/// Product 101 transaction line with only the common fields set
pub fn transaction_line(number: &str, code: &str, received: &str) -> Line {
    Line::new().put(0, number).put(8, code).put(10, received)
}

/// Product 101 name change
pub fn name_change(number: &str, received: &str, name: &str) -> String {
    transaction_line(number, "05", received)
        .put(107, name)
        .pad_to(267)
        .into_string()
}

/// Product 101 accounts made up date
pub fn accounts_made_up(number: &str, received: &str, made_up_to: &str) -> String {
    transaction_line(number, "07", received)
        .put(55, made_up_to)
        .pad_to(267)
        .into_string()
}

/// Product 101 delete
pub fn deletion(number: &str, received: &str) -> String {
    transaction_line(number, "11", received)
        .pad_to(267)
        .into_string()
}

pub fn write_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(path, contents).unwrap();
}
