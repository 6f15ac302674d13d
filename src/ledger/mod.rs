//! Ledger records and CSV loading

mod records;
pub mod loader;

pub use records::{
    Budgets, Category, Frequency, Goal, InsuranceKind, InsurancePolicy, Investment,
    InvestmentKind, Ledger, Loan, LoanKind, OtherAsset, RecurringTransaction, Transaction,
    TransactionKind,
};
pub use loader::{
    load_budgets, load_budgets_from_reader, load_goals, load_goals_from_reader,
    load_investments, load_investments_from_reader, load_loans, load_loans_from_reader,
    load_other_assets, load_other_assets_from_reader, load_policies, load_policies_from_reader,
    load_recurring, load_recurring_from_reader, load_transactions, load_transactions_from_reader,
};
