//! Loan prepayment simulator
//!
//! Compares the original schedule against a part-prepayment made today, under
//! both borrower options: keep the tenure and lower the EMI, or keep the EMI
//! and finish early.

use super::amortization::amortization_schedule;
use super::emi::{calculate_emi, monthly_rate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance below which a loan counts as repaid
const CLOSED_BALANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub outstanding_principal: f64,
    pub annual_rate_pct: f64,
    pub remaining_months: u32,
    pub prepayment_amount: f64,
}

/// Reduction in tenure when the old EMI is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenureReduction {
    /// Prepayment clears the loan outright
    LoanClosed,
    Reduced { months: u32 },
    /// The old EMI no longer covers a month's interest
    Unavailable,
    /// Nothing to simulate: no balance, rate or tenure left
    NotApplicable,
}

impl TenureReduction {
    pub fn months(&self) -> u32 {
        match self {
            TenureReduction::Reduced { months } => *months,
            _ => 0,
        }
    }
}

impl fmt::Display for TenureReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenureReduction::LoanClosed => write!(f, "Loan Closed"),
            TenureReduction::NotApplicable => write!(f, "0 months"),
            other => {
                let months = other.months();
                write!(f, "{} years, {} months", months / 12, months % 12)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentOutcome {
    pub old_emi: f64,
    /// EMI when the tenure is kept (0 when the loan closes)
    pub new_emi: f64,
    /// Interest saved by keeping the tenure and lowering the EMI
    pub interest_saved: f64,
    /// Interest saved by keeping the EMI and finishing early
    pub interest_saved_keeping_emi: f64,
    pub tenure_reduction: TenureReduction,
}

impl PrepaymentOutcome {
    fn nothing() -> Self {
        Self {
            old_emi: 0.0,
            new_emi: 0.0,
            interest_saved: 0.0,
            interest_saved_keeping_emi: 0.0,
            tenure_reduction: TenureReduction::NotApplicable,
        }
    }
}

/// Simulate a part-prepayment against the remaining loan
pub fn simulate_prepayment(input: &PrepaymentInput) -> PrepaymentOutcome {
    let PrepaymentInput {
        outstanding_principal,
        annual_rate_pct,
        remaining_months,
        prepayment_amount,
    } = *input;

    if outstanding_principal <= 0.0 || annual_rate_pct <= 0.0 || remaining_months == 0 {
        return PrepaymentOutcome::nothing();
    }

    let old_emi = calculate_emi(outstanding_principal, annual_rate_pct, remaining_months);
    let original_interest =
        amortization_schedule(outstanding_principal, annual_rate_pct, remaining_months).total_interest();

    let new_principal = outstanding_principal - prepayment_amount.max(0.0);
    if new_principal <= 0.0 {
        return PrepaymentOutcome {
            old_emi,
            new_emi: 0.0,
            interest_saved: original_interest,
            interest_saved_keeping_emi: original_interest,
            tenure_reduction: TenureReduction::LoanClosed,
        };
    }

    let new_emi = calculate_emi(new_principal, annual_rate_pct, remaining_months);
    let reduced_interest =
        amortization_schedule(new_principal, annual_rate_pct, remaining_months).total_interest();

    let (tenure_reduction, interest_saved_keeping_emi) =
        match months_to_repay(new_principal, annual_rate_pct, old_emi) {
            Some((months, interest)) => (
                TenureReduction::Reduced {
                    months: remaining_months.saturating_sub(months),
                },
                original_interest - interest,
            ),
            None => (TenureReduction::Unavailable, 0.0),
        };

    PrepaymentOutcome {
        old_emi,
        new_emi,
        interest_saved: original_interest - reduced_interest,
        interest_saved_keeping_emi,
        tenure_reduction,
    }
}

/// Months (and interest paid) to clear `principal` at a fixed `emi`.
/// `None` when the EMI never reduces the balance.
fn months_to_repay(principal: f64, annual_rate_pct: f64, emi: f64) -> Option<(u32, f64)> {
    let i = monthly_rate(annual_rate_pct);
    let mut balance = principal;
    let mut months = 0u32;
    let mut interest_paid = 0.0;

    while balance > CLOSED_BALANCE {
        let interest = balance * i;
        let principal_paid = emi - interest;
        if principal_paid <= 0.0 {
            return None;
        }
        interest_paid += interest;
        balance -= principal_paid;
        months += 1;
    }

    Some((months, interest_paid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn simulator_defaults() -> PrepaymentInput {
        PrepaymentInput {
            outstanding_principal: 1_000_000.0,
            annual_rate_pct: 8.5,
            remaining_months: 180,
            prepayment_amount: 200_000.0,
        }
    }

    #[test]
    fn test_part_prepayment() {
        let outcome = simulate_prepayment(&simulator_defaults());

        assert_abs_diff_eq!(outcome.old_emi, 9_847.3956, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.new_emi, 7_877.9165, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.interest_saved, 154_506.2409, epsilon = 1e-2);
        assert_eq!(outcome.tenure_reduction, TenureReduction::Reduced { months: 58 });
        assert_eq!(outcome.tenure_reduction.to_string(), "4 years, 10 months");
        assert_abs_diff_eq!(outcome.interest_saved_keeping_emi, 377_278.069, epsilon = 1e-2);
        assert!(outcome.interest_saved_keeping_emi > outcome.interest_saved);
    }

    #[test]
    fn test_full_prepayment_closes_loan() {
        let input = PrepaymentInput {
            prepayment_amount: 1_500_000.0,
            ..simulator_defaults()
        };
        let outcome = simulate_prepayment(&input);
        let total_interest = amortization_schedule(1_000_000.0, 8.5, 180).total_interest();

        assert_eq!(outcome.tenure_reduction, TenureReduction::LoanClosed);
        assert_eq!(outcome.tenure_reduction.to_string(), "Loan Closed");
        assert_eq!(outcome.new_emi, 0.0);
        assert_abs_diff_eq!(outcome.interest_saved, total_interest, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_prepayment_saves_nothing() {
        let input = PrepaymentInput {
            prepayment_amount: 0.0,
            ..simulator_defaults()
        };
        let outcome = simulate_prepayment(&input);
        assert_abs_diff_eq!(outcome.interest_saved, 0.0, epsilon = 1e-6);
        assert_eq!(outcome.tenure_reduction.months(), 0);
        assert_eq!(outcome.tenure_reduction.to_string(), "0 years, 0 months");
    }

    #[test]
    fn test_invalid_inputs_give_zeroes() {
        let input = PrepaymentInput {
            annual_rate_pct: 0.0,
            ..simulator_defaults()
        };
        let outcome = simulate_prepayment(&input);
        assert_eq!(outcome.old_emi, 0.0);
        assert_eq!(outcome.interest_saved, 0.0);
        assert_eq!(outcome.tenure_reduction, TenureReduction::NotApplicable);
        assert_eq!(outcome.tenure_reduction.months(), 0);
        assert_eq!(outcome.tenure_reduction.to_string(), "0 months");
    }

    #[test]
    fn test_emi_that_cannot_cover_interest() {
        assert_eq!(months_to_repay(100_000.0, 12.0, 900.0), None);
    }
}
