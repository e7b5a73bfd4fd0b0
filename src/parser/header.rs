//! File header parsing and snapshot provenance dates.
//!
//! Fixed-width products open with a header line carrying a run number and
//! the production date. The CSV product has no such header, so its date is
//! read from the `/yyyy/MM/dd/` directory segments of the file path.

use super::field_parsers::{parse_dat_format_date, slice_field};
use crate::models::Product;
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static PATH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|/)(\d{4})/(\d{2})/(\d{2})(?:/|$)").expect("valid path date pattern")
});

/// Metadata from a fixed-width header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub run_number: String,
    pub production_date: Option<NaiveDate>,
}

/// Parse a header line for the given product
///
/// Returns `None` when the line does not start with the product's sentinel.
pub fn parse_header(product: Product, line: &[u8]) -> Option<FileHeader> {
    let sentinel = product.header_sentinel()?;
    if !line.starts_with(sentinel.as_bytes()) {
        return None;
    }

    let header = FileHeader {
        run_number: slice_field(line, 8, 12),
        production_date: parse_dat_format_date(&slice_field(line, 12, 20)),
    };
    debug!(
        "Parsed {} header: run {}, produced {:?}",
        product, header.run_number, header.production_date
    );
    Some(header)
}

/// Infer a date from `/yyyy/MM/dd/` segments of a path
///
/// The last matching run of segments wins, so nested archives resolve to
/// the innermost dated directory.
pub fn date_from_path(path: &Path) -> Option<NaiveDate> {
    let normalised = path.to_string_lossy().replace('\\', "/");
    let mut found = None;
    let mut search_from = 0;

    while let Some(captures) = PATH_DATE.captures_at(&normalised, search_from) {
        let whole = captures.get(0)?;
        let year = captures[1].parse::<i32>().ok();
        let month = captures[2].parse::<u32>().ok();
        let day = captures[3].parse::<u32>().ok();
        if let (Some(year), Some(month), Some(day)) = (year, month, day) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                found = Some(date);
            }
        }
        // Step back over the trailing slash so adjacent runs can match
        search_from = whole.end().saturating_sub(1).max(whole.start() + 1);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_header() {
        let header = parse_header(Product::Prod183, b"AAAAAAAA004220240105").unwrap();
        assert_eq!(header.run_number, "0042");
        assert_eq!(
            header.production_date,
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_parse_header_with_blank_date() {
        let header = parse_header(Product::Prod101, b"AAAAAAAA0042        ").unwrap();
        assert_eq!(header.production_date, None);
    }

    #[test]
    fn test_parse_header_wrong_sentinel() {
        assert!(parse_header(Product::Prod183, b"DDDDSNAP004220240105").is_none());
        assert!(parse_header(Product::Prod217, b"AAAAAAAA004220240105").is_none());
        assert!(parse_header(Product::Prod216, b"DDDDSNAP004220240105").is_some());
    }

    #[test]
    fn test_date_from_path() {
        let path = PathBuf::from("/data/prod217/2024/03/01/BasicCompanyData.csv");
        assert_eq!(date_from_path(&path), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_date_from_path_prefers_innermost() {
        let path = PathBuf::from("/archive/2020/01/01/extract/2024/02/29/prod217.csv");
        assert_eq!(date_from_path(&path), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_date_from_path_without_segments() {
        assert_eq!(date_from_path(Path::new("/data/prod217.csv")), None);
        assert_eq!(date_from_path(Path::new("/data/2024/13/01/x.csv")), None);
    }
}
