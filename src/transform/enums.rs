//! Decoded text to canonical enumeration values

use crate::constants::LLP_PREFIX;

const JURISDICTION: &[(&str, &str)] = &[
    ("England/Wales", "england-wales"),
    ("Wales", "wales"),
    ("Scotland", "scotland"),
    ("Northern Ireland", "northern-ireland"),
    ("European Union", "european-union"),
    ("United Kingdom", "united-kingdom"),
    ("England", "england"),
    ("Overseas (Non-EU)", "noneu"),
];

/// Company categories used by the free company data CSV
const CSV_COMPANY_CATEGORY: &[(&str, &str)] = &[
    ("Private Limited Company", "ltd"),
    ("Public Limited Company", "plc"),
    ("Private Unlimited Company", "private-unlimited"),
    ("Private Unlimited", "private-unlimited"),
    (
        "PRI/LTD BY GUAR/NSC (Private, limited by guarantee, no share capital)",
        "private-limited-guarant-nsc",
    ),
    (
        "PRI/LBG/NSC (Private, Limited by guarantee, no share capital, use of 'Limited' exemption)",
        "private-limited-guarant-nsc-limited-exemption",
    ),
    ("Limited Partnership", "limited-partnership"),
    ("Limited Liability Partnership", "llp"),
    ("Investment Company with Variable Capital", "investment-company-with-variable-capital"),
    ("Other company type", "other"),
];

const INVESTMENT_COMPANY: &str = "investment-company-with-variable-capital";
const UMBRELLA_STATUS: &str = "Investment Company with Variable Capital (Umbrella)";

/// Canonical company type and subtype
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyType {
    pub company_type: Option<String>,
    pub subtype: Option<String>,
}

/// Infer the company type from a decoded fixed-width status
///
/// `Other` is shared by LLPs and miscellaneous bodies; LLP numbers carry
/// the `OC` prefix. Status-only codes (dissolved, liquidation, ...) say
/// nothing about the type.
pub fn company_type_from_status(status: &str, company_number: &str) -> CompanyType {
    let company_type = match status {
        "Private Limited" => Some("ltd"),
        "Public Limited" => Some("plc"),
        "Private Unlimited" => Some("private-unlimited"),
        "Private Limited by Guarantee" => Some("private-limited-guarant-nsc"),
        "Limited Partnership" => Some("limited-partnership"),
        "Other" if company_number.starts_with(LLP_PREFIX) => Some("llp"),
        "Other" => Some("other"),
        s if s.starts_with("Investment Company with Variable Capital") => Some(INVESTMENT_COMPANY),
        _ => None,
    };

    CompanyType {
        company_type: company_type.map(str::to_string),
        subtype: (status == UMBRELLA_STATUS).then(|| "umbrella-company".to_string()),
    }
}

/// Company type for a CSV company category
pub fn company_type_from_category(category: &str) -> Option<String> {
    let category = category.trim();
    CSV_COMPANY_CATEGORY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, value)| value.to_string())
}

/// Canonical jurisdiction for a decoded jurisdiction name
pub fn jurisdiction(decoded: &str) -> Option<String> {
    JURISDICTION
        .iter()
        .find(|(name, _)| *name == decoded)
        .map(|(_, value)| value.to_string())
}

/// Kebab-case free text (`Total Exemption Full` to `total-exemption-full`)
pub fn kebab_case(text: &str) -> Option<String> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_types() {
        assert_eq!(
            company_type_from_status("Private Limited", "00000118").company_type.as_deref(),
            Some("ltd")
        );
        assert_eq!(
            company_type_from_status("Other", "OC301234").company_type.as_deref(),
            Some("llp")
        );
        assert_eq!(
            company_type_from_status("Other", "FC012345").company_type.as_deref(),
            Some("other")
        );
        assert_eq!(
            company_type_from_status("Dissolved", "00000118"),
            CompanyType::default()
        );
    }

    #[test]
    fn test_investment_company_subtype() {
        let umbrella = company_type_from_status(UMBRELLA_STATUS, "IC000123");
        assert_eq!(umbrella.company_type.as_deref(), Some(INVESTMENT_COMPANY));
        assert_eq!(umbrella.subtype.as_deref(), Some("umbrella-company"));

        let plain =
            company_type_from_status("Investment Company with Variable Capital", "IC000124");
        assert_eq!(plain.company_type.as_deref(), Some(INVESTMENT_COMPANY));
        assert_eq!(plain.subtype, None);
    }

    #[test]
    fn test_category_types() {
        assert_eq!(
            company_type_from_category("Private Limited Company").as_deref(),
            Some("ltd")
        );
        assert_eq!(
            company_type_from_category("limited liability partnership").as_deref(),
            Some("llp")
        );
        assert_eq!(company_type_from_category("Something Else"), None);
    }

    #[test]
    fn test_jurisdiction() {
        assert_eq!(jurisdiction("England/Wales").as_deref(), Some("england-wales"));
        assert_eq!(jurisdiction("Overseas (Non-EU)").as_deref(), Some("noneu"));
        assert_eq!(jurisdiction(""), None);
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(
            kebab_case("Total Exemption Full").as_deref(),
            Some("total-exemption-full")
        );
        assert_eq!(kebab_case("TOTAL EXEMPTION FULL").as_deref(), Some("total-exemption-full"));
        assert_eq!(kebab_case("Restored").as_deref(), Some("restored"));
        assert_eq!(kebab_case("  "), None);
    }
}
