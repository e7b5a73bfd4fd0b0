//! Derived accounting dates
//!
//! The bulk products give the accounting reference day and month but not
//! the next made-up-to date, which is derived from whichever anchor date
//! is known: last accounts, next due date, then incorporation.

use crate::models::Company;
use chrono::{Datelike, Months, NaiveDate};

/// Occurrence of a day/month anchor in a year, clamped to the month's end
fn anniversary(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = first
        .checked_add_months(Months::new(1))?
        .pred_opt()?
        .day();
    NaiveDate::from_ymd_opt(year, month, day.min(last_day))
}

/// Next accounts made-up-to date for an accounting reference date
///
/// * with `last_made_up_to`, the anniversary in the following year
/// * else with `next_due`, the anniversary in that year when it falls
///   strictly before `next_due`, otherwise the previous year's
/// * else with `date_of_incorporation`, the anniversary in the following year
///
/// Returns `None` when the reference day or month is missing or out of range.
pub fn get_accounts_next_made_up_to_date(
    reference_day: Option<u32>,
    reference_month: Option<u32>,
    last_made_up_to: Option<NaiveDate>,
    next_due: Option<NaiveDate>,
    date_of_incorporation: Option<NaiveDate>,
) -> Option<NaiveDate> {
    let day = reference_day.filter(|day| (1..=31).contains(day))?;
    let month = reference_month.filter(|month| (1..=12).contains(month))?;

    if let Some(last) = last_made_up_to {
        return anniversary(last.year() + 1, month, day);
    }
    if let Some(due) = next_due {
        let candidate = anniversary(due.year(), month, day)?;
        return if candidate < due {
            Some(candidate)
        } else {
            anniversary(due.year() - 1, month, day)
        };
    }
    date_of_incorporation.and_then(|created| anniversary(created.year() + 1, month, day))
}

/// Fill in derived fields before a company record is emitted
pub fn calculate_values(company: &mut Company) {
    let date_of_creation = company.date_of_creation;

    if let Some(accounts) = company.accounts.as_mut() {
        let reference = accounts.accounting_reference_date.unwrap_or_default();
        let last_made_up_to = accounts
            .last_accounts
            .as_ref()
            .and_then(|last| last.made_up_to);

        if let Some(next) = get_accounts_next_made_up_to_date(
            reference.day,
            reference.month,
            last_made_up_to,
            accounts.next_due,
            date_of_creation,
        ) {
            accounts.next_made_up_to = Some(next);
        }
    }

    if let Some(statement) = company.confirmation_statement.as_mut() {
        if statement.next_made_up_to.is_none() {
            statement.next_made_up_to = statement
                .last_made_up_to
                .and_then(|last| last.checked_add_months(Months::new(12)));
        }
    }
}
