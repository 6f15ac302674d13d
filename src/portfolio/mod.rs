//! Derived portfolio state: per-holding performance, portfolio totals, net worth

mod performance;
mod networth;

pub use performance::{
    InvestmentPerformance, PortfolioSummary, current_value, evaluate_investment,
    evaluate_portfolio, summarize,
};
pub use networth::{NetWorth, net_worth};
