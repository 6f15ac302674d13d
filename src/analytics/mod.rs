//! Dashboard analytics derived from the ledger

mod cashflow;
mod budgets;
mod goals;
mod premiums;
mod recurring;

pub use cashflow::{
    FinancialSummary, MonthlyCashFlow, expense_breakdown, financial_summary, monthly_cash_flow,
};
pub use budgets::{BudgetStatus, budget_status};
pub use goals::{GoalProgress, goal_progress};
pub use premiums::upcoming_premiums;
pub use recurring::{due_occurrences, post_due, upcoming_bills};

use chrono::{NaiveDate, TimeDelta};

/// Last day of a look-ahead window. Saturates at `NaiveDate::MAX` for
/// windows past the calendar's range; negative windows collapse to `as_of`.
pub(crate) fn window_end(as_of: NaiveDate, window_days: i64) -> NaiveDate {
    TimeDelta::try_days(window_days.max(0))
        .and_then(|span| as_of.checked_add_signed(span))
        .unwrap_or(NaiveDate::MAX)
}
