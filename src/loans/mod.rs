//! Loan math: EMI, amortization schedules and prepayment simulation

mod emi;
mod amortization;
mod prepayment;

pub use emi::{calculate_emi, total_interest_payable, effective_annual_rate, monthly_rate};
pub use amortization::{AmortizationRow, AmortizationSchedule, amortization_schedule};
pub use prepayment::{PrepaymentInput, PrepaymentOutcome, TenureReduction, simulate_prepayment};
