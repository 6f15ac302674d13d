//! Equated Monthly Instalment (EMI)

use crate::returns::calculate_irr;

/// Monthly rate (decimal) from an annual percentage
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 12.0 / 100.0
}

/// EMI from the standard annuity formula `P·i·(1+i)^n / ((1+i)^n − 1)`.
///
/// Returns 0 for non-positive principal, negative rate or zero tenure,
/// and `P/n` for an interest-free loan.
pub fn calculate_emi(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> f64 {
    if principal <= 0.0 || annual_rate_pct < 0.0 || tenure_months == 0 {
        return 0.0;
    }

    let i = monthly_rate(annual_rate_pct);
    let n = tenure_months as f64;
    if i == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + i).powi(tenure_months as i32);
    principal * i * growth / (growth - 1.0)
}

/// Total interest over the life of the loan at a fixed EMI
pub fn total_interest_payable(principal: f64, emi: f64, tenure_months: u32) -> f64 {
    if principal <= 0.0 || emi <= 0.0 || tenure_months == 0 {
        return 0.0;
    }
    emi * tenure_months as f64 - principal
}

/// Effective annual cost of a loan when `processing_fee` is deducted upfront.
///
/// IRR of the borrower's flows: net disbursal now, EMI each month.
pub fn effective_annual_rate(
    principal: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
    processing_fee: f64,
) -> Option<f64> {
    let emi = calculate_emi(principal, annual_rate_pct, tenure_months);
    if emi <= 0.0 {
        return None;
    }

    let mut flows = Vec::with_capacity(tenure_months as usize + 1);
    flows.push(principal - processing_fee.max(0.0));
    flows.extend(std::iter::repeat(-emi).take(tenure_months as usize));
    calculate_irr(&flows, 12)
}
