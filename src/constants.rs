//! Application constants for the Companies House processor
//!
//! Sentinels, cut-off dates, default sizes and file naming patterns used
//! throughout the decoders, the snapshot engine and the CLI.

// =============================================================================
// Line Sentinels
// =============================================================================

/// Header sentinel for products 100, 101 and 183
pub const HEADER_SENTINEL: &str = "AAAAAAAA";

/// Header sentinel for the officer snapshot (product 216)
pub const OFFICER_HEADER_SENTINEL: &str = "DDDDSNAP";

/// Trailer sentinel shared by every fixed-width product
pub const TRAILER_SENTINEL: &str = "99999999";

/// Sentinel used for "no date" in `yyyyMMdd` fields
pub const NULL_DATE: &str = "00000000";

/// Separator for variable-length tail sections
pub const TAIL_SEPARATOR: u8 = b'<';

// =============================================================================
// Domain Cut-offs
// =============================================================================

/// Annual returns made up to this date or earlier predate confirmation
/// statements (Small Business, Enterprise and Employment Act 2015 commencement)
pub const CONFIRMATION_STATEMENT_CUTOFF: &str = "2016-06-29";

/// Company number prefixes that use the investment company status table
pub const INVESTMENT_COMPANY_PREFIXES: &[&str] = &["IC", "SI"];

/// Company number prefix shared by overseas companies and LLPs
pub const LLP_PREFIX: &str = "OC";

/// Base path for the canonical self link
pub const COMPANY_LINK_PREFIX: &str = "/company/";

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default number of store operations buffered before a flush
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Largest batch size accepted by configuration validation
pub const MAX_BATCH_SIZE: usize = 50_000;

/// Batch size used when loading a base snapshot
pub const BASE_LOAD_BATCH_SIZE: usize = 50_000;

/// Page size used when draining the store
pub const DRAIN_PAGE_SIZE: usize = 1_000;

/// Default read buffer, sized for a few thousand fixed-width records
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Application directory name under the user cache directory
pub const APP_CACHE_DIR: &str = "companies-house-processor";

/// Default snapshot store file name
pub const DEFAULT_STORE_FILE: &str = "snapshot.db";

// =============================================================================
// File Naming
// =============================================================================

/// Update files end with a four digit run number and this suffix
pub const UPDATE_FILE_SUFFIX: &str = "_all_opt.txt";

/// Default glob for fixed-width product files
pub const FIXED_WIDTH_PATTERN: &str = "*.txt";

/// Default glob for product 217 CSV files
pub const CSV_PATTERN: &str = "*.csv";
