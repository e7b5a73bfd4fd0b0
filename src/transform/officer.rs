//! Officer snapshot lines to the canonical officer schema

use super::title_case::convert_to_title_case;
use crate::models::{Address, AppointedTo, NameElements, Officer, PartialDateOfBirth};
use crate::parser::field_parsers::{non_empty, parse_dat_format_date};
use crate::parser::{RawOfficerCompany, RawPerson};
use chrono::Datelike;

const CORPORATE_INDICATOR: &str = "Y";

fn title(value: &str) -> Option<String> {
    non_empty(value).map(|text| convert_to_title_case(&text))
}

/// Partial date of birth from `yyyyMM` with the day from the full date
fn date_of_birth(partial: &str, full: &str) -> Option<PartialDateOfBirth> {
    let full = parse_dat_format_date(full);
    let partial = partial.trim();

    let dated_partial = partial.len() >= 6 && partial.bytes().take(6).all(|b| b.is_ascii_digit());
    let (year, month) = if dated_partial {
        let year = partial[..4].parse::<i32>().ok()?;
        let month = partial[4..6].parse::<u32>().ok()?;
        (year, month)
    } else {
        let full = full?;
        (full.year(), full.month())
    };

    if !(1..=12).contains(&month) || year == 0 {
        return None;
    }

    Some(PartialDateOfBirth {
        year,
        month,
        day: full.map(|date| date.day()),
    })
}

/// Person names read `SURNAME, Forenames`
fn display_name(surname: &str, forenames: Option<&str>) -> Option<String> {
    let surname = non_empty(surname);
    match (surname, forenames) {
        (Some(surname), Some(forenames)) => Some(format!("{}, {}", surname, forenames)),
        (Some(surname), None) => Some(surname),
        (None, forenames) => forenames.map(str::to_string),
    }
}

/// Canonical officer from a person line and its company line
///
/// `company` is the most recent company line seen; it only populates
/// `appointed_to` when it is for the same company number.
pub fn officer_from_person(person: &RawPerson, company: Option<&RawOfficerCompany>) -> Officer {
    let is_corporate_officer = person.corporate_indicator == CORPORATE_INDICATOR;

    let (name, name_elements) = if is_corporate_officer {
        (title(&person.surname).or_else(|| title(&person.forenames)), None)
    } else {
        let forenames = title(&person.forenames);
        let mut split = forenames.as_deref().unwrap_or_default().splitn(2, ' ');
        let forename = split.next().and_then(non_empty);
        let other_forenames = split.next().and_then(non_empty);

        let elements = NameElements {
            title: title(&person.title),
            forename,
            other_forenames,
            surname: non_empty(&person.surname),
            honours: non_empty(&person.honours),
        };
        (
            display_name(&person.surname, forenames.as_deref()),
            (elements != NameElements::default()).then_some(elements),
        )
    };

    let address = Address {
        care_of: title(&person.care_of),
        po_box: title(&person.po_box),
        premises: None,
        address_line_1: title(&person.address_line_1),
        address_line_2: title(&person.address_line_2),
        locality: title(&person.post_town),
        region: title(&person.county),
        country: title(&person.country),
        postal_code: non_empty(&person.person_postcode),
    };

    let appointed_to = match company {
        Some(company) if company.company_number == person.company_number => AppointedTo {
            company_number: company.company_number.clone(),
            company_name: non_empty(&company.company_name),
            company_status: non_empty(&company.company_status),
        },
        _ => AppointedTo {
            company_number: person.company_number.clone(),
            ..Default::default()
        },
    };

    Officer {
        person_number: non_empty(&person.person_number),
        is_corporate_officer,
        name,
        name_elements,
        officer_role: non_empty(&person.appointment_type),
        appointment_date_origin: non_empty(&person.appointment_date_origin),
        appointed_on: parse_dat_format_date(&person.appointment_date),
        resigned_on: parse_dat_format_date(&person.resignation_date),
        date_of_birth: if is_corporate_officer {
            None
        } else {
            date_of_birth(&person.partial_date_of_birth, &person.full_date_of_birth)
        },
        nationality: title(&person.nationality),
        occupation: title(&person.occupation),
        country_of_residence: title(&person.usual_residential_country),
        address: (!address.is_empty()).then_some(address),
        appointed_to: Some(appointed_to),
    }
}
