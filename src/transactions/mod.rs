//! Typed transactions for the gazette (100) and update (101) products
//!
//! A decoded [`RawTransaction`](crate::parser::RawTransaction) carries every
//! field its product lays out. Dispatch turns it into a [`Transaction`]
//! holding only the fields its [`TransactionType`] makes meaningful, plus
//! any values that transaction type always implies.

pub mod dispatch;

pub use dispatch::{dispatch, normalise_code};

use crate::parser::RawAddress;
use crate::parser::field_parsers::parse_dat_format_date;
use serde::{Serialize, Serializer};
use std::fmt;

/// What a transaction does to the snapshot store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Unconditional put, replacing any existing record
    Add,
    /// Deep merge into an existing record
    Update,
    /// Unconditional removal
    Delete,
    /// No store mutation
    Ignore,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Every assigned transaction type; codes 10 and 30 are unassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    NewIncorporation,
    AddRecord,
    Restoration,
    Status,
    Name,
    Address,
    AccountsMadeUpDate,
    AccountingReferenceDate,
    ConfirmationStatementDate,
    Delete,
    NoLongerUsed,
    CountryOfOriginCode,
    DissolutionFirstGazette,
    GazettableDocumentType,
    VoluntaryDissolutionIndicator,
    Liquidation,
    Dissolution,
    Receivership,
    Administration,
    DateOfIncorporation,
    SicCodes,
    NextAccountsDueDate,
    ConfirmationStatementNextDueDate,
    Jurisdiction,
    ReRegistration,
    ConvertedClosed,
    VoluntaryArrangement,
    InsolvencyProceedings,
    AccountsType,
    RegisteredOfficeAddressCorrection,
}

impl TransactionType {
    pub const ALL: [TransactionType; 30] = [
        TransactionType::NewIncorporation,
        TransactionType::AddRecord,
        TransactionType::Restoration,
        TransactionType::Status,
        TransactionType::Name,
        TransactionType::Address,
        TransactionType::AccountsMadeUpDate,
        TransactionType::AccountingReferenceDate,
        TransactionType::ConfirmationStatementDate,
        TransactionType::Delete,
        TransactionType::NoLongerUsed,
        TransactionType::CountryOfOriginCode,
        TransactionType::DissolutionFirstGazette,
        TransactionType::GazettableDocumentType,
        TransactionType::VoluntaryDissolutionIndicator,
        TransactionType::Liquidation,
        TransactionType::Dissolution,
        TransactionType::Receivership,
        TransactionType::Administration,
        TransactionType::DateOfIncorporation,
        TransactionType::SicCodes,
        TransactionType::NextAccountsDueDate,
        TransactionType::ConfirmationStatementNextDueDate,
        TransactionType::Jurisdiction,
        TransactionType::ReRegistration,
        TransactionType::ConvertedClosed,
        TransactionType::VoluntaryArrangement,
        TransactionType::InsolvencyProceedings,
        TransactionType::AccountsType,
        TransactionType::RegisteredOfficeAddressCorrection,
    ];

    /// Look up a normalised two digit code
    pub fn from_code(code: &str) -> Option<Self> {
        TransactionType::ALL
            .iter()
            .copied()
            .find(|transaction_type| transaction_type.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::NewIncorporation => "01",
            TransactionType::AddRecord => "02",
            TransactionType::Restoration => "03",
            TransactionType::Status => "04",
            TransactionType::Name => "05",
            TransactionType::Address => "06",
            TransactionType::AccountsMadeUpDate => "07",
            TransactionType::AccountingReferenceDate => "08",
            TransactionType::ConfirmationStatementDate => "09",
            TransactionType::Delete => "11",
            TransactionType::NoLongerUsed => "12",
            TransactionType::CountryOfOriginCode => "13",
            TransactionType::DissolutionFirstGazette => "14",
            TransactionType::GazettableDocumentType => "15",
            TransactionType::VoluntaryDissolutionIndicator => "16",
            TransactionType::Liquidation => "17",
            TransactionType::Dissolution => "18",
            TransactionType::Receivership => "19",
            TransactionType::Administration => "20",
            TransactionType::DateOfIncorporation => "21",
            TransactionType::SicCodes => "22",
            TransactionType::NextAccountsDueDate => "23",
            TransactionType::ConfirmationStatementNextDueDate => "24",
            TransactionType::Jurisdiction => "25",
            TransactionType::ReRegistration => "26",
            TransactionType::ConvertedClosed => "27",
            TransactionType::VoluntaryArrangement => "28",
            TransactionType::InsolvencyProceedings => "29",
            TransactionType::AccountsType => "31",
            TransactionType::RegisteredOfficeAddressCorrection => "32",
        }
    }

    /// Published transaction name
    pub fn name(&self) -> &'static str {
        match self {
            TransactionType::NewIncorporation => "New Incorporation",
            TransactionType::AddRecord => "Add Record",
            TransactionType::Restoration => "Restoration",
            TransactionType::Status => "Status",
            TransactionType::Name => "Name",
            TransactionType::Address => "Address",
            TransactionType::AccountsMadeUpDate => "Accounts Made Up Date",
            TransactionType::AccountingReferenceDate => "Accounting Reference Date",
            TransactionType::ConfirmationStatementDate => "Confirmation Statement Date",
            TransactionType::Delete => "Delete",
            TransactionType::NoLongerUsed => "No Longer Used",
            TransactionType::CountryOfOriginCode => "Country of Origin Code",
            TransactionType::DissolutionFirstGazette => "Dissolution First Gazette",
            TransactionType::GazettableDocumentType => {
                "Gazettable Document Type Not Otherwise Included"
            }
            TransactionType::VoluntaryDissolutionIndicator => "Voluntary Dissolution Indicator",
            TransactionType::Liquidation => "Liquidation",
            TransactionType::Dissolution => "Dissolution/Dissolution Final Gazette",
            TransactionType::Receivership => "Receivership",
            TransactionType::Administration => "Administration",
            TransactionType::DateOfIncorporation => "Date of Incorporation",
            TransactionType::SicCodes => "SIC Codes",
            TransactionType::NextAccountsDueDate => "Next Accounts Due Date",
            TransactionType::ConfirmationStatementNextDueDate => {
                "Confirmation Statement Next Due Date"
            }
            TransactionType::Jurisdiction => "Jurisdiction",
            TransactionType::ReRegistration => "Re-registration",
            TransactionType::ConvertedClosed => "Converted/Closed",
            TransactionType::VoluntaryArrangement => "Voluntary Arrangement",
            TransactionType::InsolvencyProceedings => "Insolvency Proceedings",
            TransactionType::AccountsType => "Accounts Type",
            TransactionType::RegisteredOfficeAddressCorrection => {
                "Registered Office Address Correction"
            }
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            TransactionType::NewIncorporation
            | TransactionType::AddRecord
            | TransactionType::Restoration => Operation::Add,
            TransactionType::Delete => Operation::Delete,
            TransactionType::NoLongerUsed
            | TransactionType::CountryOfOriginCode
            | TransactionType::DissolutionFirstGazette
            | TransactionType::GazettableDocumentType
            | TransactionType::VoluntaryDissolutionIndicator => Operation::Ignore,
            _ => Operation::Update,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Emits a raw `yyyyMMdd` date as `yyyy-MM-dd`, or null when it does not parse
fn serialize_dat_date<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match parse_dat_format_date(value) {
        Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        None => serializer.serialize_none(),
    }
}

fn serialize_optional_dat_date<S: Serializer>(
    value: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_dat_date(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// Fields every transaction carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHeader {
    pub company_number: String,
    #[serde(serialize_with = "serialize_dat_date")]
    pub received_date: String,
    pub transaction_id: String,
    pub jurisdiction: String,
}

/// Fields a transaction type projects from the raw line
///
/// `None` means the transaction type does not carry the field at all;
/// `Some("")` means it carries the field and the value is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dissolved_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplied_company_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_dat_date"
    )]
    pub date_of_incorporation: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_dat_date"
    )]
    pub date_of_cessation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_reference_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_reference_month: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_dat_date"
    )]
    pub accounts_made_up_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_type: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_dat_date"
    )]
    pub accounts_next_due_date: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_dat_date"
    )]
    pub confirmation_statement_date: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_dat_date"
    )]
    pub confirmation_statement_next_due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sic_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_office_address: Option<RawAddress>,
}

/// A dispatched transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_type: TransactionType,
    #[serde(flatten)]
    pub header: TransactionHeader,
    #[serde(flatten)]
    pub fields: TransactionFields,
}

impl Transaction {
    pub fn company_number(&self) -> &str {
        &self.header.company_number
    }

    pub fn operation(&self) -> Operation {
        self.transaction_type.operation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_skip_unassigned() {
        let codes: HashSet<&str> = TransactionType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), TransactionType::ALL.len());
        assert!(!codes.contains("10"));
        assert!(!codes.contains("30"));
    }

    #[test]
    fn test_from_code_round_trips_every_type() {
        for transaction_type in TransactionType::ALL {
            assert_eq!(
                TransactionType::from_code(transaction_type.code()),
                Some(transaction_type)
            );
        }
        assert_eq!(TransactionType::from_code("99"), None);
    }

    #[test]
    fn test_operations() {
        assert_eq!(TransactionType::NewIncorporation.operation(), Operation::Add);
        assert_eq!(TransactionType::Restoration.operation(), Operation::Add);
        assert_eq!(TransactionType::Delete.operation(), Operation::Delete);
        assert_eq!(
            TransactionType::DissolutionFirstGazette.operation(),
            Operation::Ignore
        );
        assert_eq!(TransactionType::Jurisdiction.operation(), Operation::Update);
        assert_eq!(
            TransactionType::RegisteredOfficeAddressCorrection.operation(),
            Operation::Update
        );
    }

    #[test]
    fn test_transaction_serialises_type_name() {
        let transaction = Transaction {
            transaction_type: TransactionType::Dissolution,
            header: TransactionHeader {
                company_number: "00000118".to_string(),
                ..Default::default()
            },
            fields: TransactionFields {
                dissolved_marker: Some("Dissolved".to_string()),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value["transactionType"], "Dissolution/Dissolution Final Gazette");
        assert_eq!(value["companyNumber"], "00000118");
        assert_eq!(value["dissolvedMarker"], "Dissolved");
        assert!(value.get("companyName").is_none());
    }

    #[test]
    fn test_transaction_dates_serialise_as_iso() {
        let transaction = Transaction {
            transaction_type: TransactionType::AccountsMadeUpDate,
            header: TransactionHeader {
                company_number: "00000118".to_string(),
                received_date: "20240108".to_string(),
                ..Default::default()
            },
            fields: TransactionFields {
                accounts_made_up_date: Some("20230331".to_string()),
                accounts_next_due_date: Some("00000000".to_string()),
                confirmation_statement_date: Some("20241399".to_string()),
                ..Default::default()
            },
        };
        let value = crate::transform::to_sparse_value(&transaction).unwrap();
        assert_eq!(value["receivedDate"], "2024-01-08");
        assert_eq!(value["accountsMadeUpDate"], "2023-03-31");
        assert!(value.get("accountsNextDueDate").is_none());
        assert!(value.get("confirmationStatementDate").is_none());
    }
}
