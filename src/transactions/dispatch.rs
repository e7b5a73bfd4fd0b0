//! Transaction dispatch
//!
//! One exhaustive match decides which fields each transaction type keeps
//! and which values it hardcodes.

use super::{Transaction, TransactionFields, TransactionHeader, TransactionType};
use crate::error::{ProcessorError, Result};
use crate::parser::RawTransaction;

const DISSOLVED_RESTORED: &str = "Restored";
const DISSOLVED: &str = "Dissolved";
const COMPANIES_HOUSE_CORRECTION: &str = "Companies House Correction";

/// Normalise a two or three digit type code to two digits
///
/// Gazette files use three digit codes (`018`); update files use two.
pub fn normalise_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() || code.len() > 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse::<u32>().ok().map(|number| format!("{:02}", number))
}

/// Turn a raw transaction line into its typed form
///
/// An unrecognised type code means the line layout is not what we think it
/// is, so it aborts rather than being skipped.
pub fn dispatch(raw: &RawTransaction) -> Result<Transaction> {
    let transaction_type = normalise_code(&raw.transaction_type)
        .and_then(|code| TransactionType::from_code(&code))
        .ok_or_else(|| ProcessorError::UnknownTransactionType {
            code: raw.transaction_type.clone(),
            company_number: raw.company_number.clone(),
        })?;

    let header = TransactionHeader {
        company_number: raw.company_number.clone(),
        received_date: raw.received_date.clone(),
        transaction_id: raw.transaction_id.clone(),
        jurisdiction: raw.jurisdiction.clone(),
    };

    let some = |value: &String| Some(value.clone());
    let status = || TransactionFields {
        company_status: some(&raw.company_status),
        ..Default::default()
    };

    let fields = match transaction_type {
        TransactionType::NewIncorporation => TransactionFields {
            correction_marker: Some(String::new()),
            company_status: some(&raw.company_status),
            company_name: some(&raw.company_name),
            date_of_incorporation: Some(or_effective(&raw.date_of_incorporation, raw)),
            accounting_reference_day: some(&raw.accounting_reference_day),
            accounting_reference_month: some(&raw.accounting_reference_month),
            accounts_type: some(&raw.accounts_type),
            sic_codes: Some(raw.sic_codes.clone()),
            registered_office_address: Some(raw.registered_office_address.clone()),
            ..Default::default()
        },
        TransactionType::AddRecord => full_record(raw),
        TransactionType::Restoration => TransactionFields {
            dissolved_marker: Some(DISSOLVED_RESTORED.to_string()),
            ..full_record(raw)
        },
        TransactionType::Status
        | TransactionType::Liquidation
        | TransactionType::Receivership
        | TransactionType::Administration
        | TransactionType::VoluntaryArrangement
        | TransactionType::InsolvencyProceedings => status(),
        TransactionType::Name => TransactionFields {
            company_name: some(&raw.company_name),
            supplied_company_name: some(&raw.supplied_company_name),
            ..Default::default()
        },
        TransactionType::Address => TransactionFields {
            postcode_status: some(&raw.postcode_status),
            registered_office_address: Some(raw.registered_office_address.clone()),
            ..Default::default()
        },
        TransactionType::AccountsMadeUpDate => TransactionFields {
            accounts_made_up_date: some(&raw.accounts_made_up_date),
            accounts_type: some(&raw.accounts_type),
            accounts_next_due_date: some(&raw.accounts_next_due_date),
            ..Default::default()
        },
        TransactionType::AccountingReferenceDate => TransactionFields {
            accounting_reference_day: some(&raw.accounting_reference_day),
            accounting_reference_month: some(&raw.accounting_reference_month),
            accounts_next_due_date: some(&raw.accounts_next_due_date),
            ..Default::default()
        },
        TransactionType::ConfirmationStatementDate => TransactionFields {
            confirmation_statement_date: some(&raw.confirmation_statement_date),
            confirmation_statement_next_due_date: some(&raw.confirmation_statement_next_due_date),
            ..Default::default()
        },
        TransactionType::Delete
        | TransactionType::NoLongerUsed
        | TransactionType::CountryOfOriginCode
        | TransactionType::DissolutionFirstGazette
        | TransactionType::GazettableDocumentType
        | TransactionType::VoluntaryDissolutionIndicator
        | TransactionType::Jurisdiction => TransactionFields::default(),
        TransactionType::Dissolution => TransactionFields {
            dissolved_marker: Some(DISSOLVED.to_string()),
            company_status: some(&raw.company_status),
            date_of_cessation: Some(or_effective(&raw.date_of_cessation, raw)),
            ..Default::default()
        },
        TransactionType::DateOfIncorporation => TransactionFields {
            correction_marker: Some(COMPANIES_HOUSE_CORRECTION.to_string()),
            date_of_incorporation: some(&raw.date_of_incorporation),
            ..Default::default()
        },
        TransactionType::SicCodes => TransactionFields {
            sic_codes: Some(raw.sic_codes.clone()),
            ..Default::default()
        },
        TransactionType::NextAccountsDueDate => TransactionFields {
            accounts_next_due_date: some(&raw.accounts_next_due_date),
            ..Default::default()
        },
        TransactionType::ConfirmationStatementNextDueDate => TransactionFields {
            confirmation_statement_next_due_date: some(&raw.confirmation_statement_next_due_date),
            ..Default::default()
        },
        TransactionType::ReRegistration => TransactionFields {
            company_status: some(&raw.company_status),
            company_name: some(&raw.company_name),
            ..Default::default()
        },
        TransactionType::ConvertedClosed => TransactionFields {
            company_status: some(&raw.company_status),
            date_of_cessation: some(&raw.date_of_cessation),
            ..Default::default()
        },
        TransactionType::AccountsType => TransactionFields {
            accounts_type: some(&raw.accounts_type),
            ..Default::default()
        },
        TransactionType::RegisteredOfficeAddressCorrection => TransactionFields {
            correction_marker: some(&raw.correction_marker),
            postcode_status: some(&raw.postcode_status),
            registered_office_address: Some(raw.registered_office_address.clone()),
            ..Default::default()
        },
    };

    Ok(Transaction {
        transaction_type,
        header,
        fields,
    })
}

/// Gazette lines only carry an effective date, which stands in for the
/// event date when the dedicated field is blank
fn or_effective(value: &str, raw: &RawTransaction) -> String {
    if value.is_empty() {
        raw.effective_date.clone()
    } else {
        value.to_string()
    }
}

fn full_record(raw: &RawTransaction) -> TransactionFields {
    TransactionFields {
        correction_marker: Some(raw.correction_marker.clone()),
        inspect_marker: Some(raw.inspect_marker.clone()),
        dissolved_marker: None,
        company_status: Some(raw.company_status.clone()),
        company_name: Some(raw.company_name.clone()),
        supplied_company_name: Some(raw.supplied_company_name.clone()),
        date_of_incorporation: Some(or_effective(&raw.date_of_incorporation, raw)),
        date_of_cessation: Some(raw.date_of_cessation.clone()),
        accounting_reference_day: Some(raw.accounting_reference_day.clone()),
        accounting_reference_month: Some(raw.accounting_reference_month.clone()),
        accounts_made_up_date: Some(raw.accounts_made_up_date.clone()),
        accounts_type: Some(raw.accounts_type.clone()),
        accounts_next_due_date: Some(raw.accounts_next_due_date.clone()),
        confirmation_statement_date: Some(raw.confirmation_statement_date.clone()),
        confirmation_statement_next_due_date: Some(
            raw.confirmation_statement_next_due_date.clone(),
        ),
        sic_codes: Some(raw.sic_codes.clone()),
        postcode_status: Some(raw.postcode_status.clone()),
        registered_office_address: Some(raw.registered_office_address.clone()),
    }
}
