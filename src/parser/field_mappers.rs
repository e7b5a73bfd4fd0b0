//! Code tables for coded fields
//!
//! Each mapper is a static lookup from the raw one or two character code to
//! its human readable form. Unmapped codes return `None`; callers record the
//! field as absent rather than inventing an "unknown" value.

use crate::constants::INVESTMENT_COMPANY_PREFIXES;

/// General company status table
const COMPANY_STATUS: &[(&str, &str)] = &[
    ("0", "Private Limited"),
    ("1", "Public Limited"),
    ("2", "Private Unlimited"),
    ("3", "Private Limited by Guarantee"),
    ("4", "Limited Partnership"),
    ("5", "Other"),
    ("6", "Dissolved"),
    ("7", "Liquidation"),
    ("8", "Receivership"),
    ("9", "Administration"),
    ("A", "Voluntary Arrangement"),
    ("B", "Converted/Closed"),
    ("C", "Insolvency Proceedings"),
    ("D", "Removed"),
    ("E", "Active - Proposal to Strike Off"),
];

/// Status table for investment companies with variable capital
const INVESTMENT_COMPANY_STATUS: &[(&str, &str)] = &[
    ("0", "Investment Company with Variable Capital"),
    ("1", "Investment Company with Variable Capital (Umbrella)"),
    ("2", "Investment Company with Variable Capital (Securities)"),
];

const JURISDICTION: &[(&str, &str)] = &[
    ("1", "England/Wales"),
    ("2", "Wales"),
    ("3", "Scotland"),
    ("4", "Northern Ireland"),
    ("5", "European Union"),
    ("6", "United Kingdom"),
    ("7", "England"),
    ("8", "Overseas (Non-EU)"),
];

const ACCOUNTS_TYPE: &[(&str, &str)] = &[
    ("00", "No Accounts Type Available"),
    ("01", "Full"),
    ("02", "Small"),
    ("03", "Medium"),
    ("04", "Group"),
    ("05", "Dormant"),
    ("06", "Interim"),
    ("07", "Initial"),
    ("08", "Total Exemption Full"),
    ("09", "Total Exemption Small"),
    ("10", "Partial Exemption"),
    ("11", "Audit Exemption Subsidiary"),
    ("12", "Filing Exemption Subsidiary"),
    ("13", "Micro Entity"),
    ("14", "Audited Abridged"),
    ("15", "Unaudited Abridged"),
];

const INSPECT_MARKER: &[(&str, &str)] = &[
    ("S", "Single Alternative Inspection Location"),
    ("R", "Registered Office"),
];

const POSTCODE_STATUS: &[(&str, &str)] = &[
    ("0", "Valid"),
    ("1", "Invalid"),
    ("2", "Not Supplied"),
];

const CORRECTION_MARKER: &[(&str, &str)] = &[
    ("C", "Companies House Correction"),
    ("A", "Amended"),
];

/// Officer appointment type to canonical officer role
const APPOINTMENT_TYPE: &[(&str, &str)] = &[
    ("00", "secretary"),
    ("01", "director"),
    ("04", "llp-member"),
    ("05", "llp-designated-member"),
    ("11", "judicial-factor"),
    ("12", "receiver-and-manager"),
    ("13", "cic-manager"),
    ("17", "member-of-an-administrative-organ"),
    ("18", "member-of-a-supervisory-organ"),
    ("19", "member-of-a-management-organ"),
];

const APPOINTMENT_DATE_ORIGIN: &[(&str, &str)] = &[
    ("1", "Appointment document"),
    ("2", "Annual return"),
    ("3", "Incorporation document"),
    ("4", "LLP appointment document"),
    ("5", "LLP incorporation document"),
    ("6", "Overseas company appointment document"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    let code = code.trim();
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, value)| *value)
}

/// Decode a company status code, switching tables for investment companies
pub fn company_status(code: &str, company_number: &str) -> Option<&'static str> {
    if is_investment_company(company_number) {
        lookup(INVESTMENT_COMPANY_STATUS, code)
    } else {
        lookup(COMPANY_STATUS, code)
    }
}

/// Whether a company number belongs to the investment company register
pub fn is_investment_company(company_number: &str) -> bool {
    INVESTMENT_COMPANY_PREFIXES
        .iter()
        .any(|prefix| company_number.starts_with(prefix))
}

pub fn jurisdiction(code: &str) -> Option<&'static str> {
    lookup(JURISDICTION, code)
}

pub fn accounts_type(code: &str) -> Option<&'static str> {
    lookup(ACCOUNTS_TYPE, code)
}

pub fn inspect_marker(code: &str) -> Option<&'static str> {
    lookup(INSPECT_MARKER, code)
}

pub fn postcode_status(code: &str) -> Option<&'static str> {
    lookup(POSTCODE_STATUS, code)
}

pub fn correction_marker(code: &str) -> Option<&'static str> {
    lookup(CORRECTION_MARKER, code)
}

pub fn appointment_type(code: &str) -> Option<&'static str> {
    lookup(APPOINTMENT_TYPE, code)
}

pub fn appointment_date_origin(code: &str) -> Option<&'static str> {
    lookup(APPOINTMENT_DATE_ORIGIN, code)
}

/// Decoded text or empty string, for raw record fields
pub fn or_empty(value: Option<&'static str>) -> String {
    value.unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_status_table_is_complete() {
        assert_eq!(COMPANY_STATUS.len(), 15);
        assert_eq!(company_status("0", "00000118"), Some("Private Limited"));
        assert_eq!(company_status("5", "OC301234"), Some("Other"));
        assert_eq!(
            company_status("E", "SC123456"),
            Some("Active - Proposal to Strike Off")
        );
    }

    #[test]
    fn test_investment_company_table() {
        assert_eq!(INVESTMENT_COMPANY_STATUS.len(), 3);
        assert_eq!(
            company_status("1", "IC000123"),
            Some("Investment Company with Variable Capital (Umbrella)")
        );
        assert_eq!(
            company_status("0", "SI000004"),
            Some("Investment Company with Variable Capital")
        );
        // Codes beyond the three-entry table are unmapped for ICVCs
        assert_eq!(company_status("6", "IC000123"), None);
    }

    #[test]
    fn test_unmapped_codes_are_absent() {
        assert_eq!(company_status("Z", "00000118"), None);
        assert_eq!(company_status("", "00000118"), None);
        assert_eq!(jurisdiction("9"), None);
        assert_eq!(accounts_type("99"), None);
        assert_eq!(inspect_marker(" "), None);
        assert_eq!(postcode_status("7"), None);
        assert_eq!(correction_marker("X"), None);
        assert_eq!(appointment_type("02"), None);
    }

    #[test]
    fn test_marker_tables() {
        assert_eq!(jurisdiction("3"), Some("Scotland"));
        assert_eq!(accounts_type("08"), Some("Total Exemption Full"));
        assert_eq!(postcode_status("2"), Some("Not Supplied"));
        assert_eq!(correction_marker("C"), Some("Companies House Correction"));
        assert_eq!(appointment_type("05"), Some("llp-designated-member"));
        assert_eq!(appointment_date_origin("3"), Some("Incorporation document"));
    }

    #[test]
    fn test_or_empty() {
        assert_eq!(or_empty(jurisdiction("1")), "England/Wales");
        assert_eq!(or_empty(jurisdiction("0")), "");
    }
}
