//! Monthly budget tracking

use crate::ledger::{Budgets, Category, Transaction, TransactionKind};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: Category,
    pub limit: f64,
    pub spent: f64,
    /// Negative once over budget
    pub remaining: f64,
    pub utilization_pct: f64,
    pub over_budget: bool,
}

/// Spend against each budgeted category for the month containing `as_of`
pub fn budget_status(budgets: &Budgets, transactions: &[Transaction], as_of: NaiveDate) -> Vec<BudgetStatus> {
    let (year, month) = (as_of.year(), as_of.month());

    budgets
        .iter()
        .map(|(&category, &limit)| {
            let spent: f64 = transactions
                .iter()
                .filter(|t| {
                    t.kind == TransactionKind::Expense && t.category == category && t.in_month(year, month)
                })
                .map(|t| t.amount)
                .sum();

            let utilization_pct = if limit > 0.0 { spent / limit * 100.0 } else { 0.0 };

            BudgetStatus {
                category,
                limit,
                spent,
                remaining: limit - spent,
                utilization_pct,
                over_budget: spent > limit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(day: u32, month: u32, amount: f64, category: Category) -> Transaction {
        Transaction {
            id: format!("{}-{}", month, day),
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            description: String::new(),
            amount,
            kind: TransactionKind::Expense,
            category,
            investment_id: None,
            recurring_id: None,
        }
    }

    #[test]
    fn test_budget_status() {
        let budgets: Budgets = [(Category::Food, 10_000.0), (Category::Shopping, 5_000.0)]
            .into_iter()
            .collect();
        let txns = vec![
            expense(2, 3, 4_000.0, Category::Food),
            expense(20, 3, 3_500.0, Category::Food),
            expense(10, 3, 6_000.0, Category::Shopping),
            expense(28, 2, 9_000.0, Category::Food),
            expense(11, 3, 800.0, Category::Transport),
        ];

        let status = budget_status(&budgets, &txns, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
        assert_eq!(status.len(), 2);

        let food = &status[0];
        assert_eq!(food.category, Category::Food);
        assert_eq!(food.spent, 7_500.0);
        assert_eq!(food.remaining, 2_500.0);
        assert!((food.utilization_pct - 75.0).abs() < 1e-9);
        assert!(!food.over_budget);

        let shopping = &status[1];
        assert!(shopping.over_budget);
        assert_eq!(shopping.remaining, -1_000.0);
    }
}
