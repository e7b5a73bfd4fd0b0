//! Record transformer
//!
//! Maps decoded records and dispatched transactions onto the canonical
//! company and officer schemas. Every mapping is a pure function; records
//! leave this module as sparse JSON values ready for merging or output.

pub mod accounts;
pub mod company;
pub mod enums;
pub mod officer;
pub mod sparse;
pub mod title_case;

pub use accounts::{calculate_values, get_accounts_next_made_up_to_date};
pub use company::{company_from_csv, company_from_snapshot, company_from_transaction};
pub use officer::officer_from_person;
pub use sparse::remove_empty;
pub use title_case::convert_to_title_case;

use crate::error::Result;
use crate::models::Company;
use serde::Serialize;
use serde_json::Value;

/// Serialise a record and strip its empty leaves
pub fn to_sparse_value<T: Serialize>(record: &T) -> Result<Value> {
    Ok(remove_empty(serde_json::to_value(record)?))
}

/// Derive computed fields, then serialise sparsely
pub fn finalise_company(mut company: Company) -> Result<Value> {
    calculate_values(&mut company);
    to_sparse_value(&company)
}
