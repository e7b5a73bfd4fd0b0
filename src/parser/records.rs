//! Raw record shapes produced by the line decoders
//!
//! Raw records hold decoded text only: coded fields are already translated
//! through the field mappers, every field is trimmed, and anything absent
//! from the line is an empty string.

use serde::Serialize;

/// Registered office / service address as laid out in the source files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    pub care_of: String,
    pub po_box: String,
    pub house_name_or_number: String,
    pub street: String,
    pub area: String,
    pub post_town: String,
    pub region: String,
    pub country: String,
    pub postcode: String,
}

impl RawAddress {
    pub fn is_empty(&self) -> bool {
        *self == RawAddress::default()
    }
}

/// Tail field names used to position `<`-delimited segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailField {
    HouseNameOrNumber,
    Street,
    Area,
    PostTown,
    Region,
    Country,
    Postcode,
    CareOf,
    PoBox,
    SuppliedCompanyName,
}

/// Address segments extracted from a tail, plus any supplied company name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TailSection {
    pub address: RawAddress,
    pub supplied_company_name: String,
}

impl TailSection {
    /// Assign positional segments to named fields
    pub fn from_segments(order: &[TailField], segments: Vec<String>) -> Self {
        let mut section = TailSection::default();
        for (field, value) in order.iter().zip(segments) {
            let slot = match field {
                TailField::HouseNameOrNumber => &mut section.address.house_name_or_number,
                TailField::Street => &mut section.address.street,
                TailField::Area => &mut section.address.area,
                TailField::PostTown => &mut section.address.post_town,
                TailField::Region => &mut section.address.region,
                TailField::Country => &mut section.address.country,
                TailField::Postcode => &mut section.address.postcode,
                TailField::CareOf => &mut section.address.care_of,
                TailField::PoBox => &mut section.address.po_box,
                TailField::SuppliedCompanyName => &mut section.supplied_company_name,
            };
            *slot = value;
        }
        section
    }
}

/// Company record from the fixed-width company snapshot (product 183)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompany {
    pub company_number: String,
    pub company_status: String,
    pub accounts_type: String,
    pub date_of_incorporation: String,
    pub date_of_cessation: String,
    pub accounting_reference_day: String,
    pub accounting_reference_month: String,
    pub accounts_made_up_date: String,
    pub accounts_next_due_date: String,
    pub confirmation_statement_date: String,
    pub confirmation_statement_next_due_date: String,
    pub sic_codes: Vec<String>,
    pub inspect_marker: String,
    pub postcode_status: String,
    pub company_name: String,
    pub alpha_key: String,
    pub jurisdiction: String,
    pub registered_office_address: RawAddress,
}

/// Transaction line from products 100 and 101
///
/// Product 100 carries fewer fields than 101; the fields it lacks stay
/// empty. `effective_date` is only present in product 100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub company_number: String,
    pub transaction_type: String,
    pub received_date: String,
    pub transaction_id: String,
    pub correction_marker: String,
    pub inspect_marker: String,
    pub company_status: String,
    pub jurisdiction: String,
    pub postcode_status: String,
    pub accounts_type: String,
    pub effective_date: String,
    pub date_of_incorporation: String,
    pub date_of_cessation: String,
    pub accounting_reference_day: String,
    pub accounting_reference_month: String,
    pub accounts_made_up_date: String,
    pub accounts_next_due_date: String,
    pub confirmation_statement_date: String,
    pub confirmation_statement_next_due_date: String,
    pub sic_codes: Vec<String>,
    pub company_name: String,
    pub supplied_company_name: String,
    pub registered_office_address: RawAddress,
}

/// Company line from the officer snapshot (product 216)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOfficerCompany {
    pub company_number: String,
    pub company_status: String,
    pub number_of_officers: String,
    pub company_name: String,
}

/// Person line from the officer snapshot (product 216)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    pub company_number: String,
    pub appointment_date_origin: String,
    pub appointment_type: String,
    pub person_number: String,
    pub corporate_indicator: String,
    pub appointment_date: String,
    pub resignation_date: String,
    pub person_postcode: String,
    pub partial_date_of_birth: String,
    pub full_date_of_birth: String,
    pub title: String,
    pub forenames: String,
    pub surname: String,
    pub honours: String,
    pub care_of: String,
    pub po_box: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub post_town: String,
    pub county: String,
    pub country: String,
    pub occupation: String,
    pub nationality: String,
    pub usual_residential_country: String,
}

/// Decoded product 216 data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficerLine {
    Company(RawOfficerCompany),
    Person(RawPerson),
}

/// One previous name from the CSV snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPreviousName {
    pub change_date: String,
    pub company_name: String,
}

/// Row from the free company data CSV (product 217)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCsvCompany {
    pub company_name: String,
    pub company_number: String,
    pub care_of: String,
    pub po_box: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub post_town: String,
    pub county: String,
    pub country: String,
    pub postcode: String,
    pub company_category: String,
    pub company_status: String,
    pub country_of_origin: String,
    pub dissolution_date: String,
    pub incorporation_date: String,
    pub account_ref_day: String,
    pub account_ref_month: String,
    pub accounts_next_due_date: String,
    pub accounts_last_made_up_date: String,
    pub account_category: String,
    pub returns_next_due_date: String,
    pub returns_last_made_up_date: String,
    pub sic_texts: Vec<String>,
    pub uri: String,
    pub previous_names: Vec<RawPreviousName>,
    pub conf_stmt_next_due_date: String,
    pub conf_stmt_last_made_up_date: String,
}
