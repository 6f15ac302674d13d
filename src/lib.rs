//! Personal Finance - financial math engine for a personal-finance tracker
//!
//! This library provides:
//! - XIRR (money-weighted return) and periodic IRR solvers
//! - Fixed and recurring deposit valuation
//! - EMI, amortization schedules and loan prepayment simulation
//! - Derived portfolio state: invested amount, current value, P&L, XIRR, net worth
//! - Dashboard analytics (cash flow, budgets, goals, premiums, recurring bills)
//! - Planning calculators (SIP, lump sum, inflation, FIRE, SWP, human life value)
//! - CSV ledger loading

pub mod error;
pub mod config;
pub mod returns;
pub mod deposits;
pub mod loans;
pub mod ledger;
pub mod portfolio;
pub mod analytics;
pub mod planning;
pub mod dashboard;

// Re-export commonly used types
pub use error::{FinanceError, Result};
pub use config::{EngineConfig, SolverConfig};
pub use returns::{CashFlow, xirr, xirr_percent};
pub use deposits::CompoundingFrequency;
pub use loans::{AmortizationSchedule, PrepaymentInput, PrepaymentOutcome, calculate_emi};
pub use ledger::{Ledger, Transaction, Investment, Loan};
pub use portfolio::{InvestmentPerformance, PortfolioSummary, NetWorth};
pub use dashboard::{Dashboard, build_dashboard};
