//! Product 183 decoder (fixed-width company snapshot)

use super::field_mappers::{self, or_empty};
use super::field_parsers::{fixed_chunks, slice_field, tail_segments};
use super::records::{RawCompany, TailField, TailSection};

/// Address tail order for product 183
pub const TAIL_ORDER: &[TailField] = &[
    TailField::HouseNameOrNumber,
    TailField::Street,
    TailField::Area,
    TailField::PostTown,
    TailField::Region,
    TailField::Country,
    TailField::Postcode,
    TailField::CareOf,
    TailField::PoBox,
];

/// Offset where the `<`-delimited address tail begins
pub const TAIL_START: usize = 311;

/// Decode one product 183 company line
pub fn decode_company_line(line: &[u8]) -> RawCompany {
    let company_number = slice_field(line, 0, 8);
    let tail = TailSection::from_segments(
        TAIL_ORDER,
        tail_segments(line, TAIL_START, TAIL_ORDER.len()),
    );

    RawCompany {
        company_status: or_empty(field_mappers::company_status(
            &slice_field(line, 9, 10),
            &company_number,
        )),
        accounts_type: or_empty(field_mappers::accounts_type(&slice_field(line, 10, 12))),
        date_of_incorporation: slice_field(line, 12, 20),
        date_of_cessation: slice_field(line, 20, 28),
        accounting_reference_day: slice_field(line, 28, 30),
        accounting_reference_month: slice_field(line, 30, 32),
        accounts_made_up_date: slice_field(line, 32, 40),
        accounts_next_due_date: slice_field(line, 40, 48),
        confirmation_statement_date: slice_field(line, 48, 56),
        confirmation_statement_next_due_date: slice_field(line, 56, 64),
        sic_codes: fixed_chunks(line, 64, 5, 4),
        inspect_marker: or_empty(field_mappers::inspect_marker(&slice_field(line, 84, 85))),
        postcode_status: or_empty(field_mappers::postcode_status(&slice_field(line, 85, 86))),
        company_name: slice_field(line, 90, 250),
        alpha_key: slice_field(line, 250, 310),
        jurisdiction: or_empty(field_mappers::jurisdiction(&slice_field(line, 310, 311))),
        registered_office_address: tail.address,
        company_number,
    }
}
