//! Recurring bills and income

use super::window_end;
use crate::ledger::{RecurringTransaction, Transaction};
use chrono::NaiveDate;

/// Scheduled dates in `[from, as_of]` counted from `start_date`, paired with
/// the first scheduled date after `as_of`.
fn schedule_between(
    recurring: &RecurringTransaction,
    from: NaiveDate,
    as_of: NaiveDate,
) -> (Vec<NaiveDate>, NaiveDate) {
    let mut dates = Vec::new();
    let mut k = 0u32;
    loop {
        let Some(due) = recurring.frequency.nth(recurring.start_date, k) else {
            return (dates, NaiveDate::MAX);
        };
        if due > as_of {
            return (dates, due);
        }
        if due >= from {
            dates.push(due);
        }
        k = match k.checked_add(1) {
            Some(next) => next,
            None => return (dates, NaiveDate::MAX),
        };
    }
}

/// Every scheduled date from `next_due_date` up to and including `as_of`.
///
/// Dates are counted from `start_date`, so a clamped month end (Feb 29 for
/// a schedule on the 31st) does not shift later occurrences.
pub fn due_occurrences(recurring: &RecurringTransaction, as_of: NaiveDate) -> Vec<NaiveDate> {
    schedule_between(recurring, recurring.next_due_date, as_of).0
}

/// Materialise due occurrences as transactions.
///
/// Returns the new transactions and the next due date after `as_of`, or the
/// unchanged `next_due_date` when nothing was due.
pub fn post_due(recurring: &RecurringTransaction, as_of: NaiveDate) -> (Vec<Transaction>, NaiveDate) {
    let (dates, following) = schedule_between(recurring, recurring.next_due_date, as_of);
    let next_due = if dates.is_empty() {
        recurring.next_due_date
    } else {
        following
    };

    let transactions = dates
        .into_iter()
        .map(|date| Transaction {
            id: format!("{}-{}", recurring.id, date.format("%Y%m%d")),
            date,
            description: recurring.name.clone(),
            amount: recurring.amount,
            kind: recurring.kind,
            category: recurring.category,
            investment_id: None,
            recurring_id: Some(recurring.id.clone()),
        })
        .collect();

    (transactions, next_due)
}

/// Recurring items next due within `window_days` of `as_of`, earliest first
pub fn upcoming_bills<'a>(
    recurring: &'a [RecurringTransaction],
    as_of: NaiveDate,
    window_days: i64,
) -> Vec<&'a RecurringTransaction> {
    let horizon = window_end(as_of, window_days);
    let mut upcoming: Vec<&RecurringTransaction> = recurring
        .iter()
        .filter(|r| r.next_due_date >= as_of && r.next_due_date <= horizon)
        .collect();
    upcoming.sort_by_key(|r| r.next_due_date);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, Frequency, TransactionKind};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rent() -> RecurringTransaction {
        RecurringTransaction {
            id: "rent".into(),
            name: "Rent".into(),
            amount: 15_000.0,
            kind: TransactionKind::Expense,
            category: Category::Housing,
            frequency: Frequency::Monthly,
            start_date: d(2024, 1, 31),
            next_due_date: d(2024, 1, 31),
        }
    }

    #[test]
    fn test_due_occurrences_follow_month_ends() {
        let dates = due_occurrences(&rent(), d(2024, 4, 30));
        assert_eq!(dates, vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]);
    }

    #[test]
    fn test_month_end_schedule_does_not_drift() {
        let dates = due_occurrences(&rent(), d(2024, 12, 31));
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[2], d(2024, 3, 31));
        assert_eq!(dates[10], d(2024, 11, 30));
        assert_eq!(dates[11], d(2024, 12, 31));
    }

    #[test]
    fn test_already_posted_dates_are_skipped() {
        let mut posted_to_feb = rent();
        posted_to_feb.next_due_date = d(2024, 3, 31);
        assert_eq!(
            due_occurrences(&posted_to_feb, d(2024, 5, 31)),
            vec![d(2024, 3, 31), d(2024, 4, 30), d(2024, 5, 31)]
        );
    }

    #[test]
    fn test_post_due() {
        let (posted, next) = post_due(&rent(), d(2024, 2, 29));
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0].id, "rent-20240131");
        assert_eq!(posted[1].recurring_id.as_deref(), Some("rent"));
        assert_eq!(posted[1].category, Category::Housing);
        assert_eq!(next, d(2024, 3, 31));

        let (none, unchanged) = post_due(&rent(), d(2024, 1, 1));
        assert!(none.is_empty());
        assert_eq!(unchanged, d(2024, 1, 31));
    }

    #[test]
    fn test_upcoming_bills() {
        let mut weekly = rent();
        weekly.id = "gym".into();
        weekly.frequency = Frequency::Weekly;
        weekly.next_due_date = d(2024, 1, 10);

        let items = vec![rent(), weekly];
        let upcoming = upcoming_bills(&items, d(2024, 1, 5), 30);
        let ids: Vec<&str> = upcoming.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["gym", "rent"]);
    }
}
