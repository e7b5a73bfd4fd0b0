//! Canonical officer schema.

use super::company::Address;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical officer appointment
///
/// `is_corporate_officer` distinguishes natural persons from corporate
/// bodies holding an appointment; corporate officers carry no
/// `name_elements` or date of birth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Officer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_number: Option<String>,

    pub is_corporate_officer: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_elements: Option<NameElements>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date_origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointed_on: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resigned_on: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<PartialDateOfBirth>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointed_to: Option<AppointedTo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameElements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_forenames: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honours: Option<String>,
}

/// Year and month of birth, with the day only when the full date is public
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDateOfBirth {
    pub year: i32,
    pub month: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointedTo {
    pub company_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_status: Option<String>,
}
