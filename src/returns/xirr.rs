//! Extended Internal Rate of Return (XIRR)
//!
//! Money-weighted annualized return over irregularly dated cash flows.
//! Solves `XNPV(rate) = 0` with Newton-Raphson and falls back to bisection
//! when the derivative vanishes or the iteration fails to settle.

use crate::config::SolverConfig;
use crate::error::{FinanceError, Result};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Day-count basis for XIRR discounting (Actual/365 fixed)
pub const DAYS_PER_YEAR: f64 = 365.0;

const BISECTION_ITERATIONS: u32 = 1000;
const BISECTION_WIDTH: f64 = 1e-12;

/// A dated cash flow (negative = money invested, positive = money returned)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

fn year_fraction(date: NaiveDate, base_date: NaiveDate) -> f64 {
    (date - base_date).num_days() as f64 / DAYS_PER_YEAR
}

/// Net present value of dated flows at an annual `rate`, discounted to `base_date`
pub fn xnpv(rate: f64, cash_flows: &[CashFlow], base_date: NaiveDate) -> f64 {
    cash_flows
        .iter()
        .map(|cf| cf.amount / (1.0 + rate).powf(year_fraction(cf.date, base_date)))
        .sum()
}

/// Derivative of [`xnpv`] with respect to `rate`
pub fn xnpv_derivative(rate: f64, cash_flows: &[CashFlow], base_date: NaiveDate) -> f64 {
    cash_flows
        .iter()
        .filter_map(|cf| {
            let t = year_fraction(cf.date, base_date);
            (t > 0.0).then(|| -cf.amount * t / (1.0 + rate).powf(t + 1.0))
        })
        .sum()
}

/// Calculate XIRR as an annual decimal rate (0.10 = 10%).
///
/// Newton-Raphson runs from `config.guess` and only accepts a rate whose
/// XNPV is below `config.tolerance`. A step that stalls or leaves
/// `[lower_bound, upper_bound]` hands over to bisection on that bracket.
///
/// # Arguments
/// * `cash_flows` - Dated flows in any order; discounted to the earliest date
/// * `config` - Guess, tolerance, iteration limit and rate bracket
///
/// # Returns
/// Annual rate as a decimal
///
/// # Errors
/// * `EmptyCashFlows` - no flows supplied
/// * `NoSignChange` - no outflow or no inflow, so no root exists
/// * `DidNotConverge` - neither Newton-Raphson nor bisection found a root
pub fn xirr(cash_flows: &[CashFlow], config: &SolverConfig) -> Result<f64> {
    if cash_flows.is_empty() {
        return Err(FinanceError::EmptyCashFlows);
    }

    let has_positive = cash_flows.iter().any(|cf| cf.amount > 0.0);
    let has_negative = cash_flows.iter().any(|cf| cf.amount < 0.0);
    if !has_positive || !has_negative {
        return Err(FinanceError::NoSignChange);
    }

    let mut flows = cash_flows.to_vec();
    flows.sort_by_key(|cf| cf.date);
    let base_date = flows[0].date;

    let mut rate = config.guess;
    for _ in 0..config.max_iterations {
        let npv = xnpv(rate, &flows, base_date);
        if npv.abs() < config.tolerance {
            return Ok(rate);
        }

        let dnpv = xnpv_derivative(rate, &flows, base_date);
        if !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            break;
        }

        let next = rate - npv / dnpv;
        // Steps outside the bracket fall through to bisection
        if !next.is_finite() || next <= config.lower_bound || next >= config.upper_bound {
            break;
        }
        if (next - rate).abs() < 1e-12 {
            if xnpv(next, &flows, base_date).abs() < config.tolerance {
                return Ok(next);
            }
            break;
        }
        rate = next;
    }

    debug!(
        "XIRR Newton-Raphson stalled at rate {:.6} ({} flows), falling back to bisection",
        rate,
        flows.len()
    );
    xirr_bisection(&flows, base_date, config)
}

fn xirr_bisection(flows: &[CashFlow], base_date: NaiveDate, config: &SolverConfig) -> Result<f64> {
    let mut low = config.lower_bound;
    let mut high = config.upper_bound;
    let mut npv_low = xnpv(low, flows, base_date);
    let npv_high = xnpv(high, flows, base_date);

    if !(npv_low * npv_high <= 0.0) {
        return Err(FinanceError::DidNotConverge {
            iterations: config.max_iterations,
        });
    }

    for _ in 0..BISECTION_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = xnpv(mid, flows, base_date);

        if npv_mid.abs() < config.tolerance || (high - low) / 2.0 < BISECTION_WIDTH {
            return Ok(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Err(FinanceError::DidNotConverge {
        iterations: config.max_iterations + BISECTION_ITERATIONS,
    })
}

/// XIRR in percent for display, `0.0` when no return can be computed
pub fn xirr_percent(cash_flows: &[CashFlow], config: &SolverConfig) -> f64 {
    match xirr(cash_flows, config) {
        Ok(rate) if rate.is_finite() => rate * 100.0,
        Ok(_) => 0.0,
        Err(err) => {
            debug!("XIRR unavailable: {}", err);
            0.0
        }
    }
}
