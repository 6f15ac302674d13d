//! Closed-form and month-stepped planning calculators

use crate::error::{FinanceError, Result};
use serde::{Deserialize, Serialize};

/// Future value split into contributions and growth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub invested: f64,
    pub future_value: f64,
    pub gains: f64,
}

impl Projection {
    fn new(invested: f64, future_value: f64) -> Self {
        Self {
            invested,
            future_value,
            gains: future_value - invested,
        }
    }
}

/// Future-value factor of a monthly annuity due over `months`
fn annuity_due_factor(monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return months as f64;
    }
    ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Systematic Investment Plan: `monthly` invested at the start of each month
pub fn sip_future_value(monthly: f64, annual_return_pct: f64, months: u32) -> Projection {
    if monthly <= 0.0 || months == 0 {
        return Projection::new(0.0, 0.0);
    }
    let i = annual_return_pct / 100.0 / 12.0;
    Projection::new(monthly * months as f64, monthly * annuity_due_factor(i, months))
}

/// One-time investment compounded annually
pub fn lump_sum_future_value(amount: f64, annual_return_pct: f64, years: f64) -> Projection {
    if amount <= 0.0 || years <= 0.0 {
        return Projection::new(amount.max(0.0), amount.max(0.0));
    }
    Projection::new(amount, amount * (1.0 + annual_return_pct / 100.0).powf(years))
}

/// Cost today grown by inflation over `years`
pub fn inflation_adjusted_cost(cost: f64, inflation_pct: f64, years: f64) -> f64 {
    if years <= 0.0 {
        return cost;
    }
    cost * (1.0 + inflation_pct / 100.0).powf(years)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireInput {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Today's monthly living expenses
    pub monthly_expenses: f64,
    pub inflation_pct: f64,
    pub expected_return_pct: f64,
    /// Sustainable yearly draw from the corpus, percent (4.0 = the 4% rule)
    pub safe_withdrawal_rate_pct: f64,
    pub current_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirePlan {
    pub years_to_retirement: u32,
    pub annual_expense_at_retirement: f64,
    pub corpus_required: f64,
    /// Current savings grown to retirement
    pub savings_at_retirement: f64,
    pub shortfall: f64,
    pub monthly_sip_required: f64,
}

/// Corpus needed to retire early and the monthly SIP that closes the gap
pub fn fire_plan(input: &FireInput) -> Result<FirePlan> {
    if input.safe_withdrawal_rate_pct <= 0.0 {
        return Err(FinanceError::InvalidInput(
            "safe withdrawal rate must be positive".to_string(),
        ));
    }

    let years = input.retirement_age.saturating_sub(input.current_age);
    let annual_expense_at_retirement =
        inflation_adjusted_cost(input.monthly_expenses * 12.0, input.inflation_pct, years as f64);
    let corpus_required = annual_expense_at_retirement / (input.safe_withdrawal_rate_pct / 100.0);

    let savings_at_retirement =
        lump_sum_future_value(input.current_savings, input.expected_return_pct, years as f64)
            .future_value;
    let shortfall = (corpus_required - savings_at_retirement).max(0.0);

    let months = years * 12;
    let monthly_sip_required = if months == 0 {
        shortfall
    } else {
        shortfall / annuity_due_factor(input.expected_return_pct / 100.0 / 12.0, months)
    };

    Ok(FirePlan {
        years_to_retirement: years,
        annual_expense_at_retirement,
        corpus_required,
        savings_at_retirement,
        shortfall,
        monthly_sip_required,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwpRow {
    pub month: u32,
    pub opening: f64,
    pub returns: f64,
    pub withdrawal: f64,
    pub closing: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwpSchedule {
    pub rows: Vec<SwpRow>,
    pub total_withdrawn: f64,
    pub final_balance: f64,
    /// Corpus ran out before the horizon
    pub depleted: bool,
}

impl SwpSchedule {
    pub fn months_sustained(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// Systematic Withdrawal Plan: the corpus earns a month's return, then the
/// withdrawal is paid. Stops early once the corpus is exhausted.
pub fn swp_schedule(corpus: f64, monthly_withdrawal: f64, annual_return_pct: f64, months: u32) -> SwpSchedule {
    let i = annual_return_pct / 100.0 / 12.0;
    let mut schedule = SwpSchedule {
        final_balance: corpus.max(0.0),
        ..Default::default()
    };
    let mut balance = corpus.max(0.0);

    for month in 1..=months {
        if balance <= 0.0 {
            schedule.depleted = true;
            break;
        }

        let returns = balance * i;
        let available = balance + returns;
        let withdrawal = monthly_withdrawal.max(0.0).min(available);
        let closing = available - withdrawal;

        schedule.rows.push(SwpRow {
            month,
            opening: balance,
            returns,
            withdrawal,
            closing,
        });
        schedule.total_withdrawn += withdrawal;
        balance = closing;

        if withdrawal < monthly_withdrawal {
            schedule.depleted = true;
            break;
        }
    }

    schedule.final_balance = balance;
    schedule
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HlvInput {
    pub annual_income: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub outstanding_loans: f64,
    pub existing_savings: f64,
    pub existing_cover: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HlvResult {
    pub total_needs: f64,
    pub assets_available: f64,
    /// Additional life cover needed; negative when already over-insured
    pub insurance_gap: f64,
}

/// Income-replacement estimate of life cover need
pub fn human_life_value(input: &HlvInput) -> HlvResult {
    let years = input.retirement_age.saturating_sub(input.current_age) as f64;
    let total_needs = input.annual_income * years + input.outstanding_loans;
    let assets_available = input.existing_savings + input.existing_cover;

    HlvResult {
        total_needs,
        assets_available,
        insurance_gap: total_needs - assets_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_sip() {
        let p = sip_future_value(10_000.0, 12.0, 120);
        assert_eq!(p.invested, 1_200_000.0);
        assert_relative_eq!(p.future_value, 2_323_390.7635, max_relative = 1e-9);
        assert_abs_diff_eq!(p.gains, p.future_value - 1_200_000.0);

        let flat = sip_future_value(1000.0, 0.0, 12);
        assert_eq!(flat.future_value, 12_000.0);
    }

    #[test]
    fn test_lump_sum_and_inflation() {
        let p = lump_sum_future_value(100_000.0, 12.0, 10.0);
        assert_relative_eq!(p.future_value, 310_584.8208, max_relative = 1e-9);
        assert_relative_eq!(inflation_adjusted_cost(50_000.0, 6.0, 10.0), 89_542.3848, max_relative = 1e-9);
        assert_eq!(inflation_adjusted_cost(50_000.0, 6.0, 0.0), 50_000.0);
    }

    #[test]
    fn test_fire_plan() {
        let plan = fire_plan(&FireInput {
            current_age: 30,
            retirement_age: 60,
            monthly_expenses: 50_000.0,
            inflation_pct: 6.0,
            expected_return_pct: 10.0,
            safe_withdrawal_rate_pct: 4.0,
            current_savings: 1_000_000.0,
        })
        .unwrap();

        assert_eq!(plan.years_to_retirement, 30);
        assert_relative_eq!(plan.corpus_required, 86_152_367.5937, max_relative = 1e-9);
        assert_relative_eq!(plan.savings_at_retirement, 17_449_402.2689, max_relative = 1e-9);
        assert_relative_eq!(plan.monthly_sip_required, 30_141.7988, max_relative = 1e-8);
    }

    #[test]
    fn test_fire_rejects_zero_withdrawal_rate() {
        let input = FireInput {
            current_age: 30,
            retirement_age: 45,
            monthly_expenses: 1.0,
            inflation_pct: 0.0,
            expected_return_pct: 0.0,
            safe_withdrawal_rate_pct: 0.0,
            current_savings: 0.0,
        };
        assert!(matches!(fire_plan(&input), Err(FinanceError::InvalidInput(_))));
    }

    #[test]
    fn test_swp_runs_out() {
        let schedule = swp_schedule(100_000.0, 30_000.0, 0.0, 12);
        assert!(schedule.depleted);
        assert_eq!(schedule.months_sustained(), 4);
        assert_eq!(schedule.rows[3].withdrawal, 10_000.0);
        assert_eq!(schedule.total_withdrawn, 100_000.0);
        assert_eq!(schedule.final_balance, 0.0);
    }

    #[test]
    fn test_swp_sustainable() {
        // Withdrawing exactly the monthly return keeps the corpus intact
        let schedule = swp_schedule(1_200_000.0, 12_000.0, 12.0, 24);
        assert!(!schedule.depleted);
        assert_eq!(schedule.months_sustained(), 24);
        assert_abs_diff_eq!(schedule.final_balance, 1_200_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_human_life_value() {
        let result = human_life_value(&HlvInput {
            annual_income: 500_000.0,
            current_age: 30,
            retirement_age: 60,
            outstanding_loans: 1_000_000.0,
            existing_savings: 500_000.0,
            existing_cover: 2_500_000.0,
        });
        assert_eq!(result.total_needs, 16_000_000.0);
        assert_eq!(result.assets_available, 3_000_000.0);
        assert_eq!(result.insurance_gap, 13_000_000.0);
    }
}
