//! Product 101 decoder (company data update transactions)
//!
//! Each update line carries the transaction header followed by the full
//! company field set; the dispatcher later keeps only what the transaction
//! type makes relevant.

use super::field_mappers::{self, or_empty};
use super::field_parsers::{fixed_chunks, slice_field, tail_segments};
use super::records::{RawTransaction, TailField, TailSection};

pub const TAIL_ORDER: &[TailField] = &[
    TailField::SuppliedCompanyName,
    TailField::CareOf,
    TailField::PoBox,
    TailField::HouseNameOrNumber,
    TailField::Street,
    TailField::Area,
    TailField::PostTown,
    TailField::Region,
    TailField::Country,
    TailField::Postcode,
];

pub const TAIL_START: usize = 267;

/// Decode one product 101 transaction line
pub fn decode_transaction_line(line: &[u8]) -> RawTransaction {
    let company_number = slice_field(line, 0, 8);
    let tail = TailSection::from_segments(
        TAIL_ORDER,
        tail_segments(line, TAIL_START, TAIL_ORDER.len()),
    );

    RawTransaction {
        transaction_type: slice_field(line, 8, 10),
        received_date: slice_field(line, 10, 18),
        transaction_id: slice_field(line, 18, 28),
        correction_marker: or_empty(field_mappers::correction_marker(&slice_field(line, 28, 29))),
        inspect_marker: or_empty(field_mappers::inspect_marker(&slice_field(line, 29, 30))),
        company_status: or_empty(field_mappers::company_status(
            &slice_field(line, 30, 31),
            &company_number,
        )),
        jurisdiction: or_empty(field_mappers::jurisdiction(&slice_field(line, 31, 32))),
        postcode_status: or_empty(field_mappers::postcode_status(&slice_field(line, 32, 33))),
        accounts_type: or_empty(field_mappers::accounts_type(&slice_field(line, 33, 35))),
        effective_date: String::new(),
        date_of_incorporation: slice_field(line, 35, 43),
        date_of_cessation: slice_field(line, 43, 51),
        accounting_reference_day: slice_field(line, 51, 53),
        accounting_reference_month: slice_field(line, 53, 55),
        accounts_made_up_date: slice_field(line, 55, 63),
        accounts_next_due_date: slice_field(line, 63, 71),
        confirmation_statement_date: slice_field(line, 71, 79),
        confirmation_statement_next_due_date: slice_field(line, 79, 87),
        sic_codes: fixed_chunks(line, 87, 5, 4),
        company_name: slice_field(line, 107, 267),
        supplied_company_name: tail.supplied_company_name,
        registered_office_address: tail.address,
        company_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::fixtures::Prod101Line;

    #[test]
    fn test_decode_update_line() {
        let line = Prod101Line::new("00000118", "07")
            .received("20240110")
            .transaction_id("0000004711")
            .markers("", "R")
            .status("0")
            .jurisdiction("1")
            .postcode_status("1")
            .accounts_type("09")
            .reference_date("31", "03")
            .accounts_made_up("20230331")
            .accounts_next_due("20241231")
            .sic(&["62012"])
            .name("ACME WIDGETS LIMITED")
            .tail("ACME WIDGETS LTD<<PO BOX 12<UNIT 4<MILL LANE<<LEEDS<WEST YORKSHIRE<<LS1 4AB<")
            .build();

        let record = decode_transaction_line(&line);

        assert_eq!(record.company_number, "00000118");
        assert_eq!(record.transaction_type, "07");
        assert_eq!(record.received_date, "20240110");
        assert_eq!(record.transaction_id, "0000004711");
        assert_eq!(record.correction_marker, "");
        assert_eq!(record.inspect_marker, "Registered Office");
        assert_eq!(record.company_status, "Private Limited");
        assert_eq!(record.jurisdiction, "England/Wales");
        assert_eq!(record.postcode_status, "Invalid");
        assert_eq!(record.accounts_type, "Total Exemption Small");
        assert_eq!(record.accounting_reference_day, "31");
        assert_eq!(record.accounting_reference_month, "03");
        assert_eq!(record.accounts_made_up_date, "20230331");
        assert_eq!(record.accounts_next_due_date, "20241231");
        assert_eq!(record.sic_codes, vec!["62012", "", "", ""]);
        assert_eq!(record.company_name, "ACME WIDGETS LIMITED");
        assert_eq!(record.supplied_company_name, "ACME WIDGETS LTD");

        let address = &record.registered_office_address;
        assert_eq!(address.care_of, "");
        assert_eq!(address.po_box, "PO BOX 12");
        assert_eq!(address.house_name_or_number, "UNIT 4");
        assert_eq!(address.street, "MILL LANE");
        assert_eq!(address.post_town, "LEEDS");
        assert_eq!(address.region, "WEST YORKSHIRE");
        assert_eq!(address.postcode, "LS1 4AB");
    }
}
