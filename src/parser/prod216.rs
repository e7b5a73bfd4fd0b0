//! Product 216 decoder (officer snapshot)
//!
//! The officer file interleaves company lines (record type `1`) with the
//! person lines (record type `2`) for that company's appointments.

use super::field_mappers::{self, or_empty};
use super::field_parsers::{decode_text, slice_field, tail_segments};
use super::records::{OfficerLine, RawOfficerCompany, RawPerson};

/// Offset of the person variable data section
pub const PERSON_TAIL_START: usize = 76;

/// Number of `<`-delimited person fields
pub const PERSON_TAIL_FIELDS: usize = 14;

const COMPANY_NAME_START: usize = 40;

/// Decode a data line; returns `None` for unrecognised record types
pub fn decode_officer_line(line: &[u8]) -> Option<OfficerLine> {
    match line.get(8) {
        Some(b'1') => Some(OfficerLine::Company(decode_company(line))),
        Some(b'2') => Some(OfficerLine::Person(decode_person(line))),
        _ => None,
    }
}

fn decode_company(line: &[u8]) -> RawOfficerCompany {
    let company_number = slice_field(line, 0, 8);
    let name_length = slice_field(line, 36, 40).parse::<usize>().unwrap_or(0);

    // Name runs for `name_length` bytes when given, else up to the terminator
    let name_end = if name_length > 0 {
        (COMPANY_NAME_START + name_length).min(line.len())
    } else {
        line.len()
    };
    let raw_name = if COMPANY_NAME_START < name_end {
        decode_text(&line[COMPANY_NAME_START..name_end])
    } else {
        String::new()
    };
    let company_name = raw_name
        .split('<')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    RawOfficerCompany {
        company_status: or_empty(field_mappers::company_status(
            &slice_field(line, 9, 10),
            &company_number,
        )),
        number_of_officers: slice_field(line, 32, 36),
        company_name,
        company_number,
    }
}

fn decode_person(line: &[u8]) -> RawPerson {
    let mut tail = tail_segments(line, PERSON_TAIL_START, PERSON_TAIL_FIELDS).into_iter();
    let mut next = || tail.next().unwrap_or_default();

    RawPerson {
        company_number: slice_field(line, 0, 8),
        appointment_date_origin: or_empty(field_mappers::appointment_date_origin(&slice_field(
            line, 9, 10,
        ))),
        appointment_type: or_empty(field_mappers::appointment_type(&slice_field(line, 10, 12))),
        person_number: slice_field(line, 12, 24),
        corporate_indicator: slice_field(line, 24, 25),
        appointment_date: slice_field(line, 32, 40),
        resignation_date: slice_field(line, 40, 48),
        person_postcode: slice_field(line, 48, 56),
        partial_date_of_birth: slice_field(line, 56, 64),
        full_date_of_birth: slice_field(line, 64, 72),
        title: next(),
        forenames: next(),
        surname: next(),
        honours: next(),
        care_of: next(),
        po_box: next(),
        address_line_1: next(),
        address_line_2: next(),
        post_town: next(),
        county: next(),
        country: next(),
        occupation: next(),
        nationality: next(),
        usual_residential_country: next(),
    }
}
