//! Investment performance joined from holdings and their transactions

use crate::config::EngineConfig;
use crate::deposits::{fixed_deposit_value, recurring_deposit_value};
use crate::ledger::{Category, Investment, InvestmentKind, Transaction};
use crate::returns::{xirr_percent, CashFlow};
use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A holding with its derived performance on a valuation date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentPerformance {
    pub investment: Investment,
    /// Sum of linked transaction amounts
    pub total_invested: f64,
    pub current_value: f64,
    pub pnl: f64,
    /// Annualized money-weighted return in percent (0 when unavailable)
    pub xirr_pct: f64,
}

/// Current value of a holding.
///
/// FD and RD values are recomputed from their terms when the record carries
/// them; every other holding uses its stored market value.
pub fn current_value(
    investment: &Investment,
    total_invested: f64,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> f64 {
    match (investment.kind, investment.start_date, investment.interest_rate) {
        (InvestmentKind::FixedDeposit, Some(start), Some(rate)) if rate != 0.0 => {
            fixed_deposit_value(total_invested, rate, start, as_of, config.fd_compounding)
        }
        (InvestmentKind::RecurringDeposit, Some(start), Some(rate)) if rate != 0.0 => {
            match investment.monthly_investment {
                Some(monthly) if monthly != 0.0 => {
                    recurring_deposit_value(monthly, rate, start, as_of)
                }
                _ => investment.current_value,
            }
        }
        _ => investment.current_value,
    }
}

/// Evaluate one holding against the full transaction list
pub fn evaluate_investment(
    investment: &Investment,
    transactions: &[Transaction],
    as_of: NaiveDate,
    config: &EngineConfig,
) -> InvestmentPerformance {
    let linked: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.investment_id.as_deref() == Some(investment.id.as_str()))
        .collect();

    let total_invested: f64 = linked.iter().map(|t| t.amount).sum();
    let value = current_value(investment, total_invested, as_of, config);

    let mut flows: Vec<CashFlow> = linked
        .iter()
        .map(|t| CashFlow::new(t.date, -t.amount))
        .collect();
    if value > 0.0 {
        flows.push(CashFlow::new(as_of, value));
    }

    let xirr_pct = xirr_percent(&flows, &config.solver);
    debug!(
        "{} ({}): invested {:.2}, value {:.2}, xirr {:.2}%",
        investment.name, investment.kind, total_invested, value, xirr_pct
    );

    InvestmentPerformance {
        investment: investment.clone(),
        total_invested,
        current_value: value,
        pnl: value - total_invested,
        xirr_pct,
    }
}

/// Evaluate every holding in parallel; output order follows `investments`
pub fn evaluate_portfolio(
    investments: &[Investment],
    transactions: &[Transaction],
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Vec<InvestmentPerformance> {
    investments
        .par_iter()
        .map(|inv| evaluate_investment(inv, transactions, as_of, config))
        .collect()
}

/// Portfolio-level totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_invested: f64,
    pub total_current_value: f64,
    pub overall_gain_loss: f64,
    /// Simple return on invested capital, percent
    pub overall_return_pct: f64,
    /// Money-weighted return over every investment transaction, percent
    pub xirr_pct: f64,
}

/// Aggregate holdings. Portfolio XIRR treats every `Investment`-category
/// transaction as an outflow and the total current value as the final inflow.
pub fn summarize(
    performances: &[InvestmentPerformance],
    transactions: &[Transaction],
    as_of: NaiveDate,
    config: &EngineConfig,
) -> PortfolioSummary {
    let total_invested: f64 = performances.iter().map(|p| p.total_invested).sum();
    let total_current_value: f64 = performances.iter().map(|p| p.current_value).sum();
    let overall_gain_loss = total_current_value - total_invested;

    let overall_return_pct = if total_invested > 0.0 {
        overall_gain_loss / total_invested * 100.0
    } else {
        0.0
    };

    let mut flows: Vec<CashFlow> = transactions
        .iter()
        .filter(|t| t.category == Category::Investment)
        .map(|t| CashFlow::new(t.date, -t.amount))
        .collect();
    if total_current_value > 0.0 {
        flows.push(CashFlow::new(as_of, total_current_value));
    }

    PortfolioSummary {
        total_invested,
        total_current_value,
        overall_gain_loss,
        overall_return_pct,
        xirr_pct: xirr_percent(&flows, &config.solver),
    }
}
