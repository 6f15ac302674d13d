//! Insurance premiums falling due soon

use super::window_end;
use crate::ledger::InsurancePolicy;
use chrono::NaiveDate;

/// Policies whose premium falls due within `window_days` of `as_of`
/// (both ends inclusive), earliest first
pub fn upcoming_premiums<'a>(
    policies: &'a [InsurancePolicy],
    as_of: NaiveDate,
    window_days: i64,
) -> Vec<&'a InsurancePolicy> {
    let horizon = window_end(as_of, window_days);
    let mut due: Vec<&InsurancePolicy> = policies
        .iter()
        .filter(|p| p.premium_due_date >= as_of && p.premium_due_date <= horizon)
        .collect();
    due.sort_by_key(|p| p.premium_due_date);
    due
}
