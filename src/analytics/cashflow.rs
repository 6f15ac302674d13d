//! Income and expense aggregation

use crate::ledger::{Category, Transaction, TransactionKind};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// All-time income less all-time expenses
    pub total_balance: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

/// Balance plus income and expenses for the calendar month containing `as_of`
pub fn financial_summary(transactions: &[Transaction], as_of: NaiveDate) -> FinancialSummary {
    let (year, month) = (as_of.year(), as_of.month());

    transactions
        .iter()
        .fold(FinancialSummary::default(), |mut summary, t| {
            summary.total_balance += t.signed_amount();
            if t.in_month(year, month) {
                match t.kind {
                    TransactionKind::Income => summary.monthly_income += t.amount,
                    TransactionKind::Expense => summary.monthly_expenses += t.amount,
                }
            }
            summary
        })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyCashFlow {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Income and expense per calendar month, oldest first
pub fn monthly_cash_flow(transactions: &[Transaction]) -> Vec<MonthlyCashFlow> {
    let mut months: BTreeMap<(i32, u32), MonthlyCashFlow> = BTreeMap::new();

    for t in transactions {
        let key = (t.date.year(), t.date.month());
        let entry = months.entry(key).or_insert_with(|| MonthlyCashFlow {
            year: key.0,
            month: key.1,
            income: 0.0,
            expense: 0.0,
        });
        match t.kind {
            TransactionKind::Income => entry.income += t.amount,
            TransactionKind::Expense => entry.expense += t.amount,
        }
    }

    months.into_values().collect()
}

/// Expense totals per category, largest first; categories with no spend are omitted
pub fn expense_breakdown(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: HashMap<Category, f64> = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
        *totals.entry(t.category).or_insert(0.0) += t.amount;
    }

    let mut breakdown: Vec<(Category, f64)> =
        totals.into_iter().filter(|(_, total)| *total > 0.0).collect();
    breakdown.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(on: (i32, u32, u32), amount: f64, kind: TransactionKind, category: Category) -> Transaction {
        Transaction {
            id: format!("{:?}-{}", on, amount),
            date: NaiveDate::from_ymd_opt(on.0, on.1, on.2).unwrap(),
            description: String::new(),
            amount,
            kind,
            category,
            investment_id: None,
            recurring_id: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        use Category::*;
        use TransactionKind::*;
        vec![
            txn((2023, 10, 1), 50_000.0, Income, Salary),
            txn((2023, 10, 3), 15_000.0, Expense, Housing),
            txn((2023, 11, 1), 50_000.0, Income, Salary),
            txn((2023, 11, 2), 2_500.0, Expense, Food),
            txn((2023, 11, 5), 5_000.0, Expense, Housing),
            txn((2023, 11, 9), 1_200.0, Expense, Food),
        ]
    }

    #[test]
    fn test_financial_summary() {
        let as_of = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        let summary = financial_summary(&sample(), as_of);
        assert_eq!(summary.total_balance, 100_000.0 - 23_700.0);
        assert_eq!(summary.monthly_income, 50_000.0);
        assert_eq!(summary.monthly_expenses, 8_700.0);
    }

    #[test]
    fn test_monthly_cash_flow_is_chronological() {
        let mut txns = sample();
        txns.reverse();
        let months = monthly_cash_flow(&txns);
        assert_eq!(months.len(), 2);
        assert_eq!((months[0].year, months[0].month), (2023, 10));
        assert_eq!(months[1].expense, 8_700.0);
        assert_eq!(months[0].net(), 35_000.0);
    }

    #[test]
    fn test_expense_breakdown_sorted_desc() {
        let breakdown = expense_breakdown(&sample());
        assert_eq!(breakdown, vec![(Category::Housing, 20_000.0), (Category::Food, 3_700.0)]);
    }
}
