//! Field parsing utilities for fixed-width records
//!
//! Slicing works on raw bytes so that byte offsets stay exact even when a
//! line carries multi-byte or Latin-1 characters. Every helper degrades to
//! an empty string or `None`; none of them fail.

use crate::constants::{NULL_DATE, TAIL_SEPARATOR};
use chrono::NaiveDate;

/// Decode field bytes as UTF-8, falling back to Latin-1
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Extract the trimmed text in `[start, end)`, clamped to the line length
pub fn slice_field(line: &[u8], start: usize, end: usize) -> String {
    let end = end.min(line.len());
    if start >= end {
        return String::new();
    }
    decode_text(&line[start..end]).trim().to_string()
}

/// Extract the trimmed text from `start` to the end of the line
pub fn slice_rest(line: &[u8], start: usize) -> String {
    slice_field(line, start, line.len())
}

/// Split a `<`-delimited tail section into exactly `count` segments
///
/// Trailing commas and stray carriage returns are stripped from every
/// segment; missing trailing segments are returned as empty strings.
pub fn tail_segments(line: &[u8], start: usize, count: usize) -> Vec<String> {
    let mut segments: Vec<String> = if start < line.len() {
        line[start..]
            .split(|&b| b == TAIL_SEPARATOR)
            .take(count)
            .map(clean_segment)
            .collect()
    } else {
        Vec::new()
    };
    segments.resize(count, String::new());
    segments
}

fn clean_segment(bytes: &[u8]) -> String {
    let text: String = decode_text(bytes).chars().filter(|&c| c != '\r').collect();
    text.trim().trim_end_matches(',').trim_end().to_string()
}

/// Parse a `yyyyMMdd` date
///
/// Blank values, the `00000000` sentinel and impossible dates yield `None`.
pub fn parse_dat_format_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() || value == NULL_DATE {
        return None;
    }
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

/// Parse a `dd/MM/yyyy` date as used by the CSV product
pub fn parse_slash_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

/// Parse a numeric day or month component
pub fn parse_number(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

/// `Some` for non-blank text
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a run of fixed-width codes (e.g. four 5-byte SIC codes)
pub fn fixed_chunks(line: &[u8], start: usize, width: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|index| {
            let from = start + index * width;
            slice_field(line, from, from + width)
        })
        .collect()
}
