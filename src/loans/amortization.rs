//! Month-by-month amortization schedule

use super::emi::{calculate_emi, monthly_rate};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One instalment of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Instalment number (1-indexed)
    pub month: u32,
    pub emi: f64,
    /// Principal repaid by this instalment
    pub principal: f64,
    pub interest: f64,
    /// Outstanding balance after the instalment, never negative
    pub balance: f64,
}

/// Full repayment schedule for a fixed-EMI loan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn emi(&self) -> f64 {
        self.rows.first().map(|r| r.emi).unwrap_or(0.0)
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.emi).sum()
    }

    /// Outstanding balance after `month` instalments (0 = before the first)
    pub fn balance_after(&self, month: u32) -> f64 {
        if month == 0 {
            return self
                .rows
                .first()
                .map(|r| r.balance + r.principal)
                .unwrap_or(0.0);
        }
        match self.rows.get(month as usize - 1) {
            Some(row) => row.balance,
            None => 0.0,
        }
    }

    /// Write the schedule as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Build the schedule for `principal` at `annual_rate_pct` over `tenure_months`.
///
/// Each month charges interest on the running balance and applies the rest
/// of the EMI to principal. Invalid inputs give an empty schedule.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
) -> AmortizationSchedule {
    let emi = calculate_emi(principal, annual_rate_pct, tenure_months);
    if emi <= 0.0 {
        return AmortizationSchedule::default();
    }

    let i = monthly_rate(annual_rate_pct);
    let mut balance = principal;
    let mut rows = Vec::with_capacity(tenure_months as usize);

    for month in 1..=tenure_months {
        let interest = balance * i;
        let principal_paid = emi - interest;
        balance -= principal_paid;
        rows.push(AmortizationRow {
            month,
            emi,
            principal: principal_paid,
            interest,
            balance: balance.max(0.0),
        });
    }

    AmortizationSchedule { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_schedule_pays_off_loan() {
        let schedule = amortization_schedule(100_000.0, 12.0, 12);
        assert_eq!(schedule.len(), 12);
        assert_abs_diff_eq!(schedule.rows[11].balance, 0.0, epsilon = 1e-6);

        let first = &schedule.rows[0];
        assert_abs_diff_eq!(first.interest, 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.principal + first.interest, first.emi, epsilon = 1e-9);

        let repaid: f64 = schedule.rows.iter().map(|r| r.principal).sum();
        assert_abs_diff_eq!(repaid, 100_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(schedule.total_interest(), 6_618.5464, epsilon = 1e-3);
    }

    #[test]
    fn test_interest_share_declines() {
        let schedule = amortization_schedule(2_000_000.0, 9.0, 120);
        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
            assert!(pair[1].principal > pair[0].principal);
        }
    }

    #[test]
    fn test_balance_after() {
        let schedule = amortization_schedule(100_000.0, 12.0, 12);
        assert_abs_diff_eq!(schedule.balance_after(0), 100_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule.balance_after(1), schedule.rows[0].balance);
        assert_eq!(schedule.balance_after(99), 0.0);
    }

    #[test]
    fn test_invalid_loan_gives_empty_schedule() {
        assert!(amortization_schedule(0.0, 8.0, 12).is_empty());
        assert!(amortization_schedule(1000.0, 8.0, 0).is_empty());
    }

    #[test]
    fn test_csv_export() {
        let schedule = amortization_schedule(12_000.0, 0.0, 3);
        let mut buffer = Vec::new();
        schedule.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("month,emi,principal,interest,balance"));
        assert_eq!(lines.count(), 3);
    }
}
