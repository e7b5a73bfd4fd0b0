//! Raw company records and transactions to the canonical company schema

use super::enums::{self, CompanyType};
use super::title_case::convert_to_title_case;
use crate::constants::{COMPANY_LINK_PREFIX, CONFIRMATION_STATEMENT_CUTOFF};
use crate::models::{
    AccountingReferenceDate, Accounts, Address, Company, ConfirmationStatement, LastAccounts,
    Links, PreviousCompanyName,
};
use crate::parser::field_parsers::{
    non_empty, parse_dat_format_date, parse_number, parse_slash_date,
};
use crate::parser::{RawAddress, RawCompany, RawCsvCompany};
use crate::transactions::{Operation, Transaction};
use chrono::NaiveDate;

const SIC_NOT_SUPPLIED: &str = "None Supplied";
const SIC_SEPARATOR: &str = " - ";

/// Title-cased text, or `None` when blank
fn title(value: &str) -> Option<String> {
    non_empty(value).map(|text| convert_to_title_case(&text))
}

/// Canonical registered office address from the fixed-width layout
pub fn address_from_raw(raw: &RawAddress) -> Option<Address> {
    let address = Address {
        care_of: title(&raw.care_of),
        po_box: title(&raw.po_box),
        premises: title(&raw.house_name_or_number),
        address_line_1: title(&raw.street),
        address_line_2: title(&raw.area),
        locality: title(&raw.post_town),
        region: title(&raw.region),
        country: title(&raw.country),
        postal_code: non_empty(&raw.postcode),
    };
    (!address.is_empty()).then_some(address)
}

/// Place a confirmation or annual return date either side of the cutoff
///
/// Returns `(confirmation_statement.last_made_up_to, last_full_members_list_date)`.
fn split_confirmation_date(date: Option<NaiveDate>) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match date {
        Some(date)
            if date.format("%Y-%m-%d").to_string().as_str() > CONFIRMATION_STATEMENT_CUTOFF =>
        {
            (Some(date), None)
        }
        Some(date) => (None, Some(date)),
        None => (None, None),
    }
}

fn confirmation_statement(
    last_made_up_to: Option<NaiveDate>,
    next_due: Option<NaiveDate>,
) -> Option<ConfirmationStatement> {
    if last_made_up_to.is_none() && next_due.is_none() {
        return None;
    }
    Some(ConfirmationStatement {
        last_made_up_to,
        next_made_up_to: None,
        next_due,
    })
}

fn accounts(
    reference_day: Option<u32>,
    reference_month: Option<u32>,
    made_up_to: Option<NaiveDate>,
    accounts_type: Option<String>,
    next_due: Option<NaiveDate>,
) -> Option<Accounts> {
    let accounting_reference_date = (reference_day.is_some() || reference_month.is_some())
        .then_some(AccountingReferenceDate {
            day: reference_day,
            month: reference_month,
        });
    let last_accounts = (made_up_to.is_some() || accounts_type.is_some()).then_some(LastAccounts {
        made_up_to,
        accounts_type,
    });

    if accounting_reference_date.is_none() && last_accounts.is_none() && next_due.is_none() {
        return None;
    }
    Some(Accounts {
        accounting_reference_date,
        last_accounts,
        next_made_up_to: None,
        next_due,
    })
}

fn sic_codes<I, S>(codes: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let codes: Vec<String> = codes
        .into_iter()
        .filter_map(|code| non_empty(code.as_ref()))
        .collect();
    (!codes.is_empty()).then_some(codes)
}

fn self_link(company_number: &str) -> Option<Links> {
    Some(Links {
        self_link: format!("{}{}", COMPANY_LINK_PREFIX, company_number),
    })
}

fn apply_status(company: &mut Company, status: &str) {
    let CompanyType {
        company_type,
        subtype,
    } = enums::company_type_from_status(status, &company.company_number);
    company.company_status = non_empty(status);
    company.company_type = company_type;
    company.subtype = subtype;
}

/// Canonical company from a product 183 snapshot line
pub fn company_from_snapshot(raw: &RawCompany) -> Company {
    let mut company = Company::new(raw.company_number.clone());
    apply_status(&mut company, &raw.company_status);

    let (last_made_up_to, last_full_members_list_date) =
        split_confirmation_date(parse_dat_format_date(&raw.confirmation_statement_date));

    Company {
        company_name: non_empty(&raw.company_name),
        jurisdiction: enums::jurisdiction(&raw.jurisdiction),
        date_of_creation: parse_dat_format_date(&raw.date_of_incorporation),
        date_of_cessation: parse_dat_format_date(&raw.date_of_cessation),
        accounts: accounts(
            parse_number(&raw.accounting_reference_day),
            parse_number(&raw.accounting_reference_month),
            parse_dat_format_date(&raw.accounts_made_up_date),
            enums::kebab_case(&raw.accounts_type),
            parse_dat_format_date(&raw.accounts_next_due_date),
        ),
        confirmation_statement: confirmation_statement(
            last_made_up_to,
            parse_dat_format_date(&raw.confirmation_statement_next_due_date),
        ),
        last_full_members_list_date,
        registered_office_address: address_from_raw(&raw.registered_office_address),
        sic_codes: sic_codes(&raw.sic_codes),
        links: self_link(&raw.company_number),
        ..company
    }
}

/// Canonical (partial) company carrying what a transaction knows
///
/// Only the fields the transaction type projected are populated, so the
/// result can be deep-merged over a stored record without clobbering it.
pub fn company_from_transaction(transaction: &Transaction) -> Company {
    let fields = &transaction.fields;
    let field = |value: &Option<String>| value.as_deref().unwrap_or_default().to_string();
    let mut company = Company::new(transaction.company_number());

    if let Some(status) = fields.company_status.as_deref() {
        apply_status(&mut company, status);
    }

    let (last_made_up_to, last_full_members_list_date) =
        split_confirmation_date(parse_dat_format_date(&field(&fields.confirmation_statement_date)));

    Company {
        company_name: fields.company_name.as_deref().and_then(non_empty),
        company_status_detail: fields
            .dissolved_marker
            .as_deref()
            .and_then(enums::kebab_case),
        jurisdiction: enums::jurisdiction(&transaction.header.jurisdiction),
        date_of_creation: parse_dat_format_date(&field(&fields.date_of_incorporation)),
        date_of_cessation: parse_dat_format_date(&field(&fields.date_of_cessation)),
        accounts: accounts(
            parse_number(&field(&fields.accounting_reference_day)),
            parse_number(&field(&fields.accounting_reference_month)),
            parse_dat_format_date(&field(&fields.accounts_made_up_date)),
            fields.accounts_type.as_deref().and_then(enums::kebab_case),
            parse_dat_format_date(&field(&fields.accounts_next_due_date)),
        ),
        confirmation_statement: confirmation_statement(
            last_made_up_to,
            parse_dat_format_date(&field(&fields.confirmation_statement_next_due_date)),
        ),
        last_full_members_list_date,
        registered_office_address: fields
            .registered_office_address
            .as_ref()
            .and_then(address_from_raw),
        sic_codes: fields.sic_codes.as_ref().and_then(|codes| sic_codes(codes)),
        links: if transaction.operation() == Operation::Add {
            self_link(transaction.company_number())
        } else {
            None
        },
        ..company
    }
}

/// SIC code from CSV text such as `62012 - Business and domestic software development`
fn csv_sic_code(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text == SIC_NOT_SUPPLIED {
        return None;
    }
    let code = text.split(SIC_SEPARATOR).next().unwrap_or(text);
    non_empty(code)
}

/// Previous names, newest first
///
/// Each name ceased on its change date and took effect on the next older
/// change date; the oldest name took effect when the company was created.
fn previous_company_names(
    raw: &RawCsvCompany,
    date_of_creation: Option<NaiveDate>,
) -> Option<Vec<PreviousCompanyName>> {
    let named: Vec<(String, Option<NaiveDate>)> = raw
        .previous_names
        .iter()
        .filter_map(|previous| {
            non_empty(&previous.company_name)
                .map(|name| (name, parse_slash_date(&previous.change_date)))
        })
        .collect();

    let names: Vec<PreviousCompanyName> = named
        .iter()
        .enumerate()
        .map(|(index, (name, ceased_on))| PreviousCompanyName {
            name: name.clone(),
            ceased_on: *ceased_on,
            effective_from: match named.get(index + 1) {
                Some((_, older_change)) => *older_change,
                None => date_of_creation,
            },
        })
        .collect();

    (!names.is_empty()).then_some(names)
}

/// Canonical company from a product 217 CSV row
pub fn company_from_csv(raw: &RawCsvCompany) -> Company {
    let date_of_creation = parse_slash_date(&raw.incorporation_date);
    let confirmation_date = parse_slash_date(&raw.conf_stmt_last_made_up_date)
        .or_else(|| parse_slash_date(&raw.returns_last_made_up_date));
    let (last_made_up_to, last_full_members_list_date) = split_confirmation_date(confirmation_date);
    let confirmation_next_due = parse_slash_date(&raw.conf_stmt_next_due_date)
        .or_else(|| parse_slash_date(&raw.returns_next_due_date));

    let registered_office_address = Address {
        care_of: title(&raw.care_of),
        po_box: title(&raw.po_box),
        premises: None,
        address_line_1: title(&raw.address_line_1),
        address_line_2: title(&raw.address_line_2),
        locality: title(&raw.post_town),
        region: title(&raw.county),
        country: title(&raw.country),
        postal_code: non_empty(&raw.postcode),
    };

    Company {
        company_name: non_empty(&raw.company_name),
        company_type: enums::company_type_from_category(&raw.company_category),
        company_status: non_empty(&raw.company_status),
        date_of_creation,
        date_of_cessation: parse_slash_date(&raw.dissolution_date),
        accounts: accounts(
            parse_number(&raw.account_ref_day),
            parse_number(&raw.account_ref_month),
            parse_slash_date(&raw.accounts_last_made_up_date),
            enums::kebab_case(&raw.account_category),
            parse_slash_date(&raw.accounts_next_due_date),
        ),
        confirmation_statement: confirmation_statement(last_made_up_to, confirmation_next_due),
        last_full_members_list_date,
        registered_office_address: (!registered_office_address.is_empty())
            .then_some(registered_office_address),
        sic_codes: sic_codes(raw.sic_texts.iter().filter_map(|text| csv_sic_code(text))),
        previous_company_names: previous_company_names(raw, date_of_creation),
        links: self_link(&raw.company_number),
        ..Company::new(raw.company_number.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RawPreviousName;
    use crate::transactions::{TransactionFields, TransactionHeader, TransactionType};
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn snapshot_record() -> RawCompany {
        RawCompany {
            company_number: "00000118".to_string(),
            company_status: "Private Limited".to_string(),
            accounts_type: "Total Exemption Full".to_string(),
            date_of_incorporation: "19800101".to_string(),
            accounting_reference_day: "31".to_string(),
            accounting_reference_month: "03".to_string(),
            accounts_next_due_date: "20211231".to_string(),
            confirmation_statement_date: "20160629".to_string(),
            sic_codes: vec!["62012".to_string(), String::new(), String::new(), String::new()],
            company_name: "ACME WIDGETS LIMITED".to_string(),
            jurisdiction: "England/Wales".to_string(),
            registered_office_address: RawAddress {
                house_name_or_number: "4TH FLOOR".to_string(),
                street: "1 HIGH STREET".to_string(),
                post_town: "LONDON".to_string(),
                postcode: "E1 6AN".to_string(),
                care_of: "KPMG LLP".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_company_from_snapshot() {
        let company = company_from_snapshot(&snapshot_record());

        assert_eq!(company.company_number, "00000118");
        assert_eq!(company.company_name.as_deref(), Some("ACME WIDGETS LIMITED"));
        assert_eq!(company.company_type.as_deref(), Some("ltd"));
        assert_eq!(company.company_status.as_deref(), Some("Private Limited"));
        assert_eq!(company.jurisdiction.as_deref(), Some("england-wales"));
        assert_eq!(company.date_of_creation, date(1980, 1, 1));
        assert_eq!(company.date_of_cessation, None);

        let accounts = company.accounts.unwrap();
        assert_eq!(
            accounts.accounting_reference_date,
            Some(AccountingReferenceDate {
                day: Some(31),
                month: Some(3)
            })
        );
        assert_eq!(
            accounts.last_accounts.unwrap().accounts_type.as_deref(),
            Some("total-exemption-full")
        );
        assert_eq!(accounts.next_due, date(2021, 12, 31));

        // On the cutoff itself the date is still an annual return
        assert_eq!(company.last_full_members_list_date, date(2016, 6, 29));
        assert_eq!(company.confirmation_statement, None);

        let address = company.registered_office_address.unwrap();
        assert_eq!(address.premises.as_deref(), Some("4th Floor"));
        assert_eq!(address.address_line_1.as_deref(), Some("1 High Street"));
        assert_eq!(address.locality.as_deref(), Some("London"));
        assert_eq!(address.postal_code.as_deref(), Some("E1 6AN"));
        assert_eq!(address.care_of.as_deref(), Some("KPMG LLP"));

        assert_eq!(company.sic_codes, Some(vec!["62012".to_string()]));
        assert_eq!(company.links.unwrap().self_link, "/company/00000118");
    }

    #[test]
    fn test_confirmation_date_after_cutoff() {
        let raw = RawCompany {
            confirmation_statement_date: "20160630".to_string(),
            confirmation_statement_next_due_date: "20170714".to_string(),
            ..snapshot_record()
        };
        let company = company_from_snapshot(&raw);
        assert_eq!(company.last_full_members_list_date, None);
        assert_eq!(
            company.confirmation_statement,
            Some(ConfirmationStatement {
                last_made_up_to: date(2016, 6, 30),
                next_made_up_to: None,
                next_due: date(2017, 7, 14),
            })
        );
    }

    #[test]
    fn test_status_only_snapshot_has_no_type() {
        let raw = RawCompany {
            company_status: "Liquidation".to_string(),
            ..snapshot_record()
        };
        let company = company_from_snapshot(&raw);
        assert_eq!(company.company_status.as_deref(), Some("Liquidation"));
        assert_eq!(company.company_type, None);
    }

    fn transaction(
        transaction_type: TransactionType,
        fields: TransactionFields,
    ) -> Transaction {
        Transaction {
            transaction_type,
            header: TransactionHeader {
                company_number: "00000118".to_string(),
                received_date: "20240110".to_string(),
                transaction_id: "0000004711".to_string(),
                jurisdiction: "England/Wales".to_string(),
            },
            fields,
        }
    }

    #[test]
    fn test_accounts_transaction_is_partial() {
        let company = company_from_transaction(&transaction(
            TransactionType::AccountsMadeUpDate,
            TransactionFields {
                accounts_made_up_date: Some("20230331".to_string()),
                accounts_type: Some("Full".to_string()),
                accounts_next_due_date: Some(String::new()),
                ..Default::default()
            },
        ));

        assert_eq!(
            company,
            Company {
                jurisdiction: Some("england-wales".to_string()),
                accounts: Some(Accounts {
                    last_accounts: Some(LastAccounts {
                        made_up_to: date(2023, 3, 31),
                        accounts_type: Some("full".to_string()),
                    }),
                    ..Default::default()
                }),
                ..Company::new("00000118")
            }
        );
    }

    #[test]
    fn test_dissolution_transaction_sets_status_detail() {
        let company = company_from_transaction(&transaction(
            TransactionType::Dissolution,
            TransactionFields {
                dissolved_marker: Some("Dissolved".to_string()),
                company_status: Some("Dissolved".to_string()),
                date_of_cessation: Some("20240109".to_string()),
                ..Default::default()
            },
        ));
        assert_eq!(company.company_status.as_deref(), Some("Dissolved"));
        assert_eq!(company.company_status_detail.as_deref(), Some("dissolved"));
        assert_eq!(company.date_of_cessation, date(2024, 1, 9));
        assert_eq!(company.company_type, None);
        assert_eq!(company.links, None);
    }

    #[test]
    fn test_add_transaction_carries_self_link() {
        let company = company_from_transaction(&transaction(
            TransactionType::NewIncorporation,
            TransactionFields {
                correction_marker: Some(String::new()),
                company_status: Some("Private Limited".to_string()),
                company_name: Some("NEWCO LIMITED".to_string()),
                ..Default::default()
            },
        ));
        assert_eq!(company.company_type.as_deref(), Some("ltd"));
        assert_eq!(company.links.unwrap().self_link, "/company/00000118");
    }

    #[test]
    fn test_company_from_csv() {
        let mut raw = RawCsvCompany {
            company_name: "ACME WIDGETS LIMITED".to_string(),
            company_number: "00000118".to_string(),
            address_line_1: "1 HIGH STREET".to_string(),
            post_town: "LONDON".to_string(),
            postcode: "E1 6AN".to_string(),
            company_category: "Private Limited Company".to_string(),
            company_status: "Active".to_string(),
            incorporation_date: "01/01/1980".to_string(),
            account_ref_day: "31".to_string(),
            account_ref_month: "3".to_string(),
            accounts_last_made_up_date: "31/03/2023".to_string(),
            account_category: "TOTAL EXEMPTION FULL".to_string(),
            conf_stmt_last_made_up_date: "04/05/2023".to_string(),
            conf_stmt_next_due_date: "18/05/2024".to_string(),
            sic_texts: vec![
                "62012 - Business and domestic software development".to_string(),
                "None Supplied".to_string(),
                String::new(),
                String::new(),
            ],
            ..Default::default()
        };
        raw.previous_names = vec![
            RawPreviousName {
                change_date: "12/05/2001".to_string(),
                company_name: "ACME LIMITED".to_string(),
            },
            RawPreviousName {
                change_date: "03/02/1990".to_string(),
                company_name: "ACME HOLDINGS LIMITED".to_string(),
            },
            RawPreviousName::default(),
        ];

        let company = company_from_csv(&raw);

        assert_eq!(company.company_type.as_deref(), Some("ltd"));
        assert_eq!(company.company_status.as_deref(), Some("Active"));
        assert_eq!(company.date_of_creation, date(1980, 1, 1));
        assert_eq!(company.jurisdiction, None);
        assert_eq!(company.sic_codes, Some(vec!["62012".to_string()]));
        assert_eq!(
            company.accounts.as_ref().unwrap().last_accounts,
            Some(LastAccounts {
                made_up_to: date(2023, 3, 31),
                accounts_type: Some("total-exemption-full".to_string()),
            })
        );
        assert_eq!(
            company.confirmation_statement.as_ref().unwrap().last_made_up_to,
            date(2023, 5, 4)
        );
        assert_eq!(
            company.previous_company_names,
            Some(vec![
                PreviousCompanyName {
                    name: "ACME LIMITED".to_string(),
                    ceased_on: date(2001, 5, 12),
                    effective_from: date(1990, 2, 3),
                },
                PreviousCompanyName {
                    name: "ACME HOLDINGS LIMITED".to_string(),
                    ceased_on: date(1990, 2, 3),
                    effective_from: date(1980, 1, 1),
                },
            ])
        );
        assert_eq!(
            company.registered_office_address.unwrap().address_line_1.as_deref(),
            Some("1 High Street")
        );
    }
}
