//! Savings goal progress, funded by investments linked to the goal

use crate::deposits::completed_months;
use crate::ledger::Goal;
use crate::portfolio::InvestmentPerformance;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    /// Current value of linked investments
    pub saved: f64,
    /// May exceed 100 once the goal is overfunded
    pub progress_pct: f64,
    pub remaining: f64,
    /// Whole months until the deadline
    pub months_left: u32,
    /// Saving needed per month to finish on time
    pub monthly_required: f64,
}

pub fn goal_progress(goal: &Goal, performances: &[InvestmentPerformance], as_of: NaiveDate) -> GoalProgress {
    let saved: f64 = performances
        .iter()
        .filter(|p| p.investment.goal_id.as_deref() == Some(goal.id.as_str()))
        .map(|p| p.current_value)
        .sum();

    let progress_pct = if goal.target_amount > 0.0 {
        saved / goal.target_amount * 100.0
    } else {
        0.0
    };

    let remaining = (goal.target_amount - saved).max(0.0);
    let months_left = completed_months(as_of, goal.deadline);
    let monthly_required = if months_left > 0 {
        remaining / months_left as f64
    } else {
        remaining
    };

    GoalProgress {
        goal_id: goal.id.clone(),
        saved,
        progress_pct,
        remaining,
        months_left,
        monthly_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Investment, InvestmentKind};

    fn perf(goal_id: Option<&str>, value: f64) -> InvestmentPerformance {
        InvestmentPerformance {
            investment: Investment {
                id: "inv".into(),
                name: "Liquid Fund".into(),
                kind: InvestmentKind::MutualFunds,
                current_value: value,
                start_date: None,
                interest_rate: None,
                monthly_investment: None,
                goal_id: goal_id.map(str::to_string),
            },
            total_invested: value,
            current_value: value,
            pnl: 0.0,
            xirr_pct: 0.0,
        }
    }

    #[test]
    fn test_goal_progress() {
        let goal = Goal {
            id: "goa".into(),
            name: "Vacation to Goa".into(),
            target_amount: 50_000.0,
            deadline: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        let perfs = vec![perf(Some("goa"), 15_000.0), perf(None, 99_000.0)];
        let progress = goal_progress(&goal, &perfs, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(progress.saved, 15_000.0);
        assert!((progress.progress_pct - 30.0).abs() < 1e-9);
        assert_eq!(progress.remaining, 35_000.0);
        assert_eq!(progress.months_left, 5);
        assert!((progress.monthly_required - 7_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_target_and_past_deadline() {
        let goal = Goal {
            id: "g".into(),
            name: "Placeholder".into(),
            target_amount: 0.0,
            deadline: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        let progress = goal_progress(&goal, &[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(progress.progress_pct, 0.0);
        assert_eq!(progress.months_left, 0);
        assert_eq!(progress.monthly_required, 0.0);
    }
}
