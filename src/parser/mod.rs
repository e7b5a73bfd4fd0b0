//! Line decoders for the Companies House bulk products
//!
//! Each product has its own decoder declaring its exact byte layout; the
//! code tables in [`field_mappers`] and the slicing helpers in
//! [`field_parsers`] are the only shared pieces.
//!
//! Decoders never fail on content: unmapped codes and blank fields decode
//! to empty strings. Only the CSV product can fail, when a row is not
//! valid CSV.

pub mod field_mappers;
pub mod field_parsers;
pub mod header;
pub mod line_kind;
pub mod prod100;
pub mod prod101;
pub mod prod183;
pub mod prod216;
pub mod prod217;
pub mod records;

#[cfg(test)]
pub mod tests;

pub use header::{FileHeader, date_from_path, parse_header};
pub use line_kind::{LineKind, classify_line};
pub use prod217::ColumnMapping;
pub use records::{
    OfficerLine, RawAddress, RawCompany, RawCsvCompany, RawOfficerCompany, RawPerson,
    RawPreviousName, RawTransaction,
};

use crate::models::Product;

/// Decode a product 100 or 101 transaction line
///
/// Returns `None` for non-transactional products.
pub fn decode_transaction(product: Product, line: &[u8]) -> Option<RawTransaction> {
    match product {
        Product::Prod100 => Some(prod100::decode_transaction_line(line)),
        Product::Prod101 => Some(prod101::decode_transaction_line(line)),
        _ => None,
    }
}
