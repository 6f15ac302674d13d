//! Internal Rate of Return over evenly spaced cash flows
//!
//! Used for effective loan cost where every flow falls on an instalment date.

use log::debug;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: u32 = 1000;
const LOWER_RATE: f64 = -0.99;
const UPPER_RATE: f64 = 10.0;

/// Calculate the annualized IRR of evenly spaced cash flows
///
/// Newton-Raphson on the periodic rate, falling back to bisection on
/// `[-0.99, 10]` when a step stalls or leaves that range.
///
/// # Arguments
/// * `cashflows` - One flow per period; index 0 is the first period
/// * `periods_per_year` - 12 for monthly flows, 4 for quarterly
///
/// # Returns
/// * `Some(rate)` - Effective annual rate as a decimal
/// * `Some(0.0)` - All flows are zero
/// * `None` - No sign change, or no root inside the range
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() || periods_per_year == 0 {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let annualize = |periodic: f64| (1.0 + periodic).powi(periods_per_year as i32) - 1.0;

    let mut rate = 0.05 / periods_per_year as f64;
    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            break;
        }

        let next = rate - npv / dnpv;
        if !next.is_finite() || next <= LOWER_RATE || next >= UPPER_RATE {
            break;
        }
        if (next - rate).abs() < TOLERANCE {
            return Some(annualize(next));
        }
        rate = next;
    }

    debug!("periodic IRR falling back to bisection after rate {:.8}", rate);
    bisection(cashflows).map(annualize)
}

fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(npv, dnpv), (t, &cf)| {
            let npv = npv + cf / (1.0 + rate).powi(t as i32);
            let dnpv = if t > 0 {
                dnpv - (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1)
            } else {
                dnpv
            };
            (npv, dnpv)
        })
}

fn npv_at(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = LOWER_RATE;
    let mut high = UPPER_RATE;
    let mut npv_low = npv_at(cashflows, low);

    if npv_low * npv_at(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_monthly_irr() {
        // Deposit 1000, withdraw 1100 twelve months later
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        assert!((irr - 0.10).abs() < 0.001, "Expected ~10% IRR, got {}", irr);
    }

    #[test]
    fn test_level_repayments_recover_loan_rate() {
        // 12% p.a. nominal loan repaid monthly -> effective 12.68%
        let emi = crate::loans::calculate_emi(100_000.0, 12.0, 24);
        let mut cashflows = vec![100_000.0];
        cashflows.extend(vec![-emi; 24]);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        let expected = 1.01_f64.powi(12) - 1.0;
        assert!((irr - expected).abs() < 1e-6, "got {}", irr);
    }

    #[test]
    fn test_periodic_rate_beyond_range_is_rejected() {
        // 100 -> 1200 in one month is a periodic rate of 11
        assert_eq!(calculate_irr(&[-100.0, 1200.0], 12), None);

        let irr = calculate_irr(&[-100.0, 900.0], 1).unwrap();
        assert!((irr - 8.0).abs() < 1e-6, "got {}", irr);
    }

    #[test]
    fn test_degenerate_flows() {
        assert_eq!(calculate_irr(&[], 12), None);
        assert_eq!(calculate_irr(&[0.0, 0.0], 12), Some(0.0));
        assert_eq!(calculate_irr(&[100.0, 50.0], 12), None);
    }
}
