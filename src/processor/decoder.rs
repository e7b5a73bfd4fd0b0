//! Per-file line decoding
//!
//! Turns raw lines into canonical records for one product. The decoder is
//! stateful only where the format is: the CSV product needs its header row
//! before any data, and officer lines inherit the preceding company line.

use crate::error::{ProcessorError, Result};
use crate::models::{Company, Officer, Product};
use crate::parser::prod183::decode_company_line;
use crate::parser::prod216::decode_officer_line;
use crate::parser::prod217::{decode_row, is_header_line};
use crate::parser::{
    ColumnMapping, FileHeader, LineKind, OfficerLine, RawOfficerCompany, classify_line,
    decode_transaction, parse_header,
};
use crate::transactions::{Transaction, dispatch};
use crate::transform::{
    company_from_csv, company_from_snapshot, finalise_company, officer_from_person, to_sparse_value,
};
use serde_json::Value;

/// A canonical record decoded from one line
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedRecord {
    Company(Company),
    Transaction(Transaction),
    Officer(Officer),
}

impl DecodedRecord {
    /// Company the record belongs to
    pub fn company_number(&self) -> &str {
        match self {
            DecodedRecord::Company(company) => &company.company_number,
            DecodedRecord::Transaction(transaction) => transaction.company_number(),
            DecodedRecord::Officer(officer) => officer
                .appointed_to
                .as_ref()
                .map(|appointed| appointed.company_number.as_str())
                .unwrap_or_default(),
        }
    }

    /// Sparse JSON ready for output, with computed company fields
    pub fn into_output(self) -> Result<Value> {
        match self {
            DecodedRecord::Company(company) => finalise_company(company),
            DecodedRecord::Transaction(transaction) => to_sparse_value(&transaction),
            DecodedRecord::Officer(officer) => to_sparse_value(&officer),
        }
    }
}

/// Outcome of decoding one line
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    Header(FileHeader),
    /// CSV column header row
    ColumnHeader,
    Trailer,
    Unknown,
    /// Officer company line; provides context for following person lines
    OfficerCompany,
    Record(DecodedRecord),
}

/// Stateful decoder for the lines of one file
#[derive(Debug)]
pub struct LineDecoder {
    product: Product,
    columns: Option<ColumnMapping>,
    officer_company: Option<RawOfficerCompany>,
}

impl LineDecoder {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            columns: None,
            officer_company: None,
        }
    }

    pub fn product(&self) -> Product {
        self.product
    }

    /// Decode one line
    ///
    /// Only structural problems are errors: an unknown transaction type, or
    /// CSV data without a header row.
    pub fn decode(&mut self, line: &[u8]) -> Result<DecodedLine> {
        if line.is_empty() {
            return Ok(DecodedLine::Unknown);
        }
        if self.product == Product::Prod217 {
            return self.decode_csv(line);
        }

        match classify_line(self.product, line) {
            LineKind::Header => Ok(parse_header(self.product, line)
                .map(DecodedLine::Header)
                .unwrap_or(DecodedLine::Unknown)),
            LineKind::Trailer => Ok(DecodedLine::Trailer),
            LineKind::Unknown => Ok(DecodedLine::Unknown),
            LineKind::Company | LineKind::Person if self.product == Product::Prod216 => {
                Ok(self.decode_officer(line))
            }
            LineKind::Company => Ok(DecodedLine::Record(DecodedRecord::Company(
                company_from_snapshot(&decode_company_line(line)),
            ))),
            LineKind::Transaction => match decode_transaction(self.product, line) {
                Some(raw) => Ok(DecodedLine::Record(DecodedRecord::Transaction(dispatch(
                    &raw,
                )?))),
                None => Ok(DecodedLine::Unknown),
            },
            LineKind::Person => Ok(DecodedLine::Unknown),
        }
    }

    fn decode_officer(&mut self, line: &[u8]) -> DecodedLine {
        match decode_officer_line(line) {
            Some(OfficerLine::Company(company)) => {
                self.officer_company = Some(company);
                DecodedLine::OfficerCompany
            }
            Some(OfficerLine::Person(person)) => DecodedLine::Record(DecodedRecord::Officer(
                officer_from_person(&person, self.officer_company.as_ref()),
            )),
            None => DecodedLine::Unknown,
        }
    }

    fn decode_csv(&mut self, line: &[u8]) -> Result<DecodedLine> {
        if is_header_line(line) {
            self.columns = Some(ColumnMapping::from_header_line(line)?);
            return Ok(DecodedLine::ColumnHeader);
        }

        let columns = self.columns.as_ref().ok_or_else(|| {
            ProcessorError::invalid_format("<csv header>", "data row before the column header row")
        })?;
        let raw = decode_row(columns, line)?;
        if raw.company_number.is_empty() {
            return Ok(DecodedLine::Unknown);
        }
        Ok(DecodedLine::Record(DecodedRecord::Company(company_from_csv(
            &raw,
        ))))
    }
}
