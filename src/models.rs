//! Core data structures and types for Companies House processing.
//!
//! Defines the supported bulk products, output formats, processing
//! statistics and the canonical Company / Officer output schema.

pub mod company;
pub mod officer;

pub use company::{
    AccountingReferenceDate, Accounts, Address, Company, ConfirmationStatement, LastAccounts,
    Links, PreviousCompanyName,
};
pub use officer::{AppointedTo, NameElements, Officer, PartialDateOfBirth};

use crate::constants::{CSV_PATTERN, FIXED_WIDTH_PATTERN, HEADER_SENTINEL, OFFICER_HEADER_SENTINEL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Companies House bulk data products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    /// Gazette transactions (fixed width)
    Prod100,
    /// Company data update transactions (fixed width)
    Prod101,
    /// Company snapshot (fixed width)
    Prod183,
    /// Officer snapshot (fixed width)
    Prod216,
    /// Free company data snapshot (CSV)
    Prod217,
}

impl Product {
    /// Products carrying incremental transactions rather than full records
    pub fn is_transactional(&self) -> bool {
        matches!(self, Product::Prod100 | Product::Prod101)
    }

    /// Products usable as the base of a snapshot run
    pub fn is_company_snapshot(&self) -> bool {
        matches!(self, Product::Prod183 | Product::Prod217)
    }

    /// Header sentinel for fixed-width products
    pub fn header_sentinel(&self) -> Option<&'static str> {
        match self {
            Product::Prod100 | Product::Prod101 | Product::Prod183 => Some(HEADER_SENTINEL),
            Product::Prod216 => Some(OFFICER_HEADER_SENTINEL),
            Product::Prod217 => None,
        }
    }

    /// Default file glob when reading a directory of this product
    pub fn default_pattern(&self) -> &'static str {
        match self {
            Product::Prod217 => CSV_PATTERN,
            _ => FIXED_WIDTH_PATTERN,
        }
    }

    /// Numeric product code
    pub fn code(&self) -> &'static str {
        match self {
            Product::Prod100 => "100",
            Product::Prod101 => "101",
            Product::Prod183 => "183",
            Product::Prod216 => "216",
            Product::Prod217 => "217",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prod{}", self.code())
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        match code.trim_start_matches("prod") {
            "100" => Ok(Product::Prod100),
            "101" => Ok(Product::Prod101),
            "183" => Ok(Product::Prod183),
            "216" => Ok(Product::Prod216),
            "217" => Ok(Product::Prod217),
            _ => Err(format!(
                "unsupported product '{}': expected one of 100, 101, 183, 216, 217",
                s
            )),
        }
    }
}

/// Output serialisation format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unsupported output format '{}'", other)),
        }
    }
}

/// Processing statistics for a convert or snapshot run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub lines_read: usize,
    pub bytes_read: u64,
    pub header_lines: usize,
    pub trailer_lines: usize,
    pub unknown_lines: usize,
    pub records_filtered: usize,
    pub records_written: usize,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Fold another run's counters into this one
    pub fn absorb(&mut self, other: &ProcessingStats) {
        self.files_processed += other.files_processed;
        self.lines_read += other.lines_read;
        self.bytes_read += other.bytes_read;
        self.header_lines += other.header_lines;
        self.trailer_lines += other.trailer_lines;
        self.unknown_lines += other.unknown_lines;
        self.records_filtered += other.records_filtered;
        self.records_written += other.records_written;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_parsing() {
        assert_eq!("183".parse::<Product>(), Ok(Product::Prod183));
        assert_eq!("prod101".parse::<Product>(), Ok(Product::Prod101));
        assert_eq!("PROD217".parse::<Product>(), Ok(Product::Prod217));
        assert!("195".parse::<Product>().is_err());
    }

    #[test]
    fn test_product_classification() {
        assert!(Product::Prod100.is_transactional());
        assert!(Product::Prod101.is_transactional());
        assert!(!Product::Prod183.is_transactional());
        assert!(Product::Prod217.is_company_snapshot());
        assert!(!Product::Prod216.is_company_snapshot());
        assert_eq!(Product::Prod216.header_sentinel(), Some("DDDDSNAP"));
        assert_eq!(Product::Prod217.header_sentinel(), None);
        assert_eq!(Product::Prod217.default_pattern(), "*.csv");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = ProcessingStats::default();
        let run = ProcessingStats {
            files_processed: 1,
            lines_read: 10,
            records_written: 8,
            header_lines: 1,
            trailer_lines: 1,
            ..Default::default()
        };
        total.absorb(&run);
        total.absorb(&run);
        assert_eq!(total.files_processed, 2);
        assert_eq!(total.lines_read, 20);
        assert_eq!(total.records_written, 16);
    }
}
