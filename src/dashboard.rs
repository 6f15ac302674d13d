//! Full derived view of a ledger on a valuation date
//!
//! Evaluates holdings once and feeds the results to every dashboard widget.

use crate::analytics::{
    budget_status, expense_breakdown, financial_summary, goal_progress, monthly_cash_flow,
    upcoming_bills, upcoming_premiums, BudgetStatus, FinancialSummary, GoalProgress,
    MonthlyCashFlow,
};
use crate::config::EngineConfig;
use crate::ledger::{Category, InsurancePolicy, Ledger, RecurringTransaction};
use crate::portfolio::{
    evaluate_portfolio, net_worth, summarize, InvestmentPerformance, NetWorth, PortfolioSummary,
};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub summary: FinancialSummary,
    pub cash_flow: Vec<MonthlyCashFlow>,
    pub expenses: Vec<(Category, f64)>,
    pub investments: Vec<InvestmentPerformance>,
    pub portfolio: PortfolioSummary,
    pub net_worth: NetWorth,
    pub budgets: Vec<BudgetStatus>,
    pub goals: Vec<GoalProgress>,
    pub upcoming_premiums: Vec<InsurancePolicy>,
    pub upcoming_bills: Vec<RecurringTransaction>,
}

/// Build every derived view for `ledger` as of `as_of`
pub fn build_dashboard(ledger: &Ledger, as_of: NaiveDate, config: &EngineConfig) -> Dashboard {
    let investments = evaluate_portfolio(&ledger.investments, &ledger.transactions, as_of, config);
    let portfolio = summarize(&investments, &ledger.transactions, as_of, config);
    let worth = net_worth(&investments, &ledger.other_assets, &ledger.loans);

    let goals = ledger
        .goals
        .iter()
        .map(|goal| goal_progress(goal, &investments, as_of))
        .collect();

    let window = config.premium_window_days;
    let dashboard = Dashboard {
        as_of,
        summary: financial_summary(&ledger.transactions, as_of),
        cash_flow: monthly_cash_flow(&ledger.transactions),
        expenses: expense_breakdown(&ledger.transactions),
        budgets: budget_status(&ledger.budgets, &ledger.transactions, as_of),
        upcoming_premiums: upcoming_premiums(&ledger.policies, as_of, window)
            .into_iter()
            .cloned()
            .collect(),
        upcoming_bills: upcoming_bills(&ledger.recurring, as_of, window)
            .into_iter()
            .cloned()
            .collect(),
        investments,
        portfolio,
        net_worth: worth,
        goals,
    };

    info!(
        "Dashboard as of {}: net worth {:.2}, portfolio XIRR {:.2}%",
        as_of, dashboard.net_worth.net_worth, dashboard.portfolio.xirr_pct
    );

    dashboard
}
