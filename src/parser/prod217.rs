//! Product 217 decoder (free company data CSV)
//!
//! The CSV product is line-oriented like the fixed-width products, but its
//! columns are located by name from the header row rather than by offset.

use super::field_parsers::decode_text;
use super::records::{RawCsvCompany, RawPreviousName};
use crate::error::{ProcessorError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;

/// Number of `SICCode.SicText_N` columns
pub const SIC_TEXT_COLUMNS: usize = 4;

/// Number of `PreviousName_N.*` column pairs
pub const PREVIOUS_NAME_COLUMNS: usize = 10;

/// Columns a header row must carry to be recognised as product 217
const REQUIRED_COLUMNS: [&str; 2] = ["CompanyName", "CompanyNumber"];

/// Column name to index mapping taken from the header row
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Build the mapping from a parsed header record
    ///
    /// Header names in the published files carry stray leading spaces, so
    /// every name is trimmed before indexing.
    pub fn analyze(headers: &StringRecord) -> Result<Self> {
        let name_to_index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !name_to_index.contains_key(**column))
        {
            return Err(ProcessorError::invalid_format(
                "<csv header>",
                format!("missing required column {}", missing),
            ));
        }

        Ok(Self { name_to_index })
    }

    /// Build the mapping straight from the raw header line
    pub fn from_header_line(line: &[u8]) -> Result<Self> {
        Self::analyze(&parse_record(line)?)
    }

    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    fn value(&self, record: &StringRecord, column_name: &str) -> String {
        self.get_index(column_name)
            .and_then(|index| record.get(index))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

/// Parse one CSV line into a record
pub fn parse_record(line: &[u8]) -> Result<StringRecord> {
    let text = decode_text(line);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Whether a line is the header row rather than data
pub fn is_header_line(line: &[u8]) -> bool {
    let text = decode_text(line);
    let first = text.split(',').next().unwrap_or_default();
    first.trim().trim_matches('"').trim() == REQUIRED_COLUMNS[0]
}

/// Decode a data line using a previously analysed header
pub fn decode_row(mapping: &ColumnMapping, line: &[u8]) -> Result<RawCsvCompany> {
    let record = parse_record(line)?;
    Ok(decode_record(mapping, &record))
}

/// Map a parsed record onto the raw CSV company shape
pub fn decode_record(mapping: &ColumnMapping, record: &StringRecord) -> RawCsvCompany {
    let value = |name: &str| mapping.value(record, name);

    let sic_texts = (1..=SIC_TEXT_COLUMNS)
        .map(|n| value(&format!("SICCode.SicText_{}", n)))
        .collect();

    let previous_names = (1..=PREVIOUS_NAME_COLUMNS)
        .map(|n| RawPreviousName {
            change_date: value(&format!("PreviousName_{}.CONDATE", n)),
            company_name: value(&format!("PreviousName_{}.CompanyName", n)),
        })
        .collect();

    RawCsvCompany {
        company_name: value("CompanyName"),
        company_number: value("CompanyNumber"),
        care_of: value("RegAddress.CareOf"),
        po_box: value("RegAddress.POBox"),
        address_line_1: value("RegAddress.AddressLine1"),
        address_line_2: value("RegAddress.AddressLine2"),
        post_town: value("RegAddress.PostTown"),
        county: value("RegAddress.County"),
        country: value("RegAddress.Country"),
        postcode: value("RegAddress.PostCode"),
        company_category: value("CompanyCategory"),
        company_status: value("CompanyStatus"),
        country_of_origin: value("CountryOfOrigin"),
        dissolution_date: value("DissolutionDate"),
        incorporation_date: value("IncorporationDate"),
        account_ref_day: value("Accounts.AccountRefDay"),
        account_ref_month: value("Accounts.AccountRefMonth"),
        accounts_next_due_date: value("Accounts.NextDueDate"),
        accounts_last_made_up_date: value("Accounts.LastMadeUpDate"),
        account_category: value("Accounts.AccountCategory"),
        returns_next_due_date: value("Returns.NextDueDate"),
        returns_last_made_up_date: value("Returns.LastMadeUpDate"),
        sic_texts,
        uri: value("URI"),
        previous_names,
        conf_stmt_next_due_date: value("ConfStmtNextDueDate"),
        conf_stmt_last_made_up_date: value("ConfStmtLastMadeUpDate"),
    }
}
