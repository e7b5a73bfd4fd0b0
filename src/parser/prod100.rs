//! Product 100 decoder (gazette transactions)
//!
//! Gazette lines carry a three digit transaction type and an effective
//! date for the gazetted event, but no accounts or confirmation data.

use super::field_mappers::{self, or_empty};
use super::field_parsers::{slice_field, tail_segments};
use super::records::{RawTransaction, TailField, TailSection};

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

pub const TAIL_START: usize = 200;

/// Decode one product 100 transaction line
pub fn decode_transaction_line(line: &[u8]) -> RawTransaction {
    let company_number = slice_field(line, 0, 8);
    let tail = TailSection::from_segments(
        TAIL_ORDER,
        tail_segments(line, TAIL_START, TAIL_ORDER.len()),
    );

    RawTransaction {
        transaction_type: slice_field(line, 8, 11),
        received_date: slice_field(line, 11, 19),
        transaction_id: slice_field(line, 19, 29),
        correction_marker: or_empty(field_mappers::correction_marker(&slice_field(line, 29, 30))),
        company_status: or_empty(field_mappers::company_status(
            &slice_field(line, 30, 31),
            &company_number,
        )),
        jurisdiction: or_empty(field_mappers::jurisdiction(&slice_field(line, 31, 32))),
        effective_date: slice_field(line, 32, 40),
        company_name: slice_field(line, 40, 200),
        sic_codes: Vec::new(),
        registered_office_address: tail.address,
        supplied_company_name: tail.supplied_company_name,
        company_number,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::fixtures::Prod100Line;

    #[test]
    fn test_decode_gazette_line() {
        let line = Prod100Line::new("SC123456", "018")
            .received("20240110")
            .transaction_id("T000000001")
            .correction("C")
            .status("6")
            .jurisdiction("3")
            .effective("20240109")
            .name("HIGHLAND HOLDINGS LIMITED")
            .tail("1<GEORGE STREET<<EDINBURGH<<SCOTLAND<EH2 2LR<<")
            .build();

        let record = decode_transaction_line(&line);

        assert_eq!(record.company_number, "SC123456");
        assert_eq!(record.transaction_type, "018");
        assert_eq!(record.received_date, "20240110");
        assert_eq!(record.transaction_id, "T000000001");
        assert_eq!(record.correction_marker, "Companies House Correction");
        assert_eq!(record.company_status, "Dissolved");
        assert_eq!(record.jurisdiction, "Scotland");
        assert_eq!(record.effective_date, "20240109");
        assert_eq!(record.company_name, "HIGHLAND HOLDINGS LIMITED");
        assert_eq!(record.registered_office_address.street, "GEORGE STREET");
        assert_eq!(record.registered_office_address.postcode, "EH2 2LR");
        // Fields absent from product 100 stay empty
        assert_eq!(record.accounts_made_up_date, "");
        assert_eq!(record.inspect_marker, "");
        assert!(record.sic_codes.is_empty());
    }
}
