//! Canonical company schema.
//!
//! Every product maps onto a subset of these fields. Anything a product
//! cannot determine stays `None` and is never serialised.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical company record (possibly partial)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_status_detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_creation: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_cessation: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Accounts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_statement: Option<ConfirmationStatement>,

    /// Annual return date for returns made up before confirmation statements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_full_members_list_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_office_address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sic_codes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_company_names: Option<Vec<PreviousCompanyName>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl Company {
    /// Start a record for a company number
    pub fn new(company_number: impl Into<String>) -> Self {
        Self {
            company_number: company_number.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_reference_date: Option<AccountingReferenceDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accounts: Option<LastAccounts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_made_up_to: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
}

/// Day/month anchor of the accounting year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountingReferenceDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastAccounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub made_up_to: Option<NaiveDate>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub accounts_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_made_up_to: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_made_up_to: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
}

/// Postal address shared by registered offices and officers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_of: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premises: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    /// True when no address component is known
    pub fn is_empty(&self) -> bool {
        *self == Address::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousCompanyName {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}
