//! Load ledger records from CSV exports
//!
//! One file per record type inside a ledger directory. Dates may be plain
//! `YYYY-MM-DD` or full ISO-8601 timestamps; only the date part is kept.

use super::records::*;
use crate::error::{FinanceError, Result};
use chrono::NaiveDate;
use csv::Reader;
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const INVESTMENTS_FILE: &str = "investments.csv";
pub const LOANS_FILE: &str = "loans.csv";
pub const GOALS_FILE: &str = "goals.csv";
pub const POLICIES_FILE: &str = "insurance_policies.csv";
pub const OTHER_ASSETS_FILE: &str = "other_assets.csv";
pub const BUDGETS_FILE: &str = "budgets.csv";
pub const RECURRING_FILE: &str = "recurring_transactions.csv";

/// Raw row of transactions.csv
#[derive(Debug, serde::Deserialize)]
struct TransactionRow {
    id: String,
    date: String,
    #[serde(default)]
    description: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    #[serde(default)]
    investment_id: Option<String>,
    #[serde(default)]
    recurring_transaction_id: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct InvestmentRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    current_value: Option<f64>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    interest_rate: Option<f64>,
    #[serde(default)]
    monthly_investment: Option<f64>,
    #[serde(default)]
    goal_id: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct LoanRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    principal: f64,
    outstanding_amount: f64,
    interest_rate: f64,
    /// Years
    tenure: u32,
    #[serde(default)]
    emi: Option<f64>,
    start_date: String,
    #[serde(default)]
    asset_current_value: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct GoalRow {
    id: String,
    name: String,
    target_amount: f64,
    deadline: String,
}

#[derive(Debug, serde::Deserialize)]
struct PolicyRow {
    id: String,
    policy_name: String,
    #[serde(rename = "type")]
    kind: String,
    sum_assured: f64,
    premium_amount: f64,
    premium_due_date: String,
    issue_date: String,
    expiry_date: String,
}

#[derive(Debug, serde::Deserialize)]
struct OtherAssetRow {
    id: String,
    name: String,
    value: f64,
}

#[derive(Debug, serde::Deserialize)]
struct BudgetRow {
    category: String,
    limit: f64,
}

#[derive(Debug, serde::Deserialize)]
struct RecurringRow {
    id: String,
    name: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    frequency: String,
    start_date: String,
    #[serde(default)]
    next_due_date: Option<String>,
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| FinanceError::invalid_record(field, value))
}

fn parse_optional_date(field: &'static str, value: Option<String>) -> Result<Option<NaiveDate>> {
    match non_empty(value) {
        Some(v) => parse_date(field, &v).map(Some),
        None => Ok(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_label<T>(field: &'static str, value: &str, parse: fn(&str) -> Option<T>) -> Result<T> {
    parse(value).ok_or_else(|| FinanceError::invalid_record(field, value))
}

impl TransactionRow {
    fn to_record(self) -> Result<Transaction> {
        Ok(Transaction {
            date: parse_date("date", &self.date)?,
            kind: parse_label("type", &self.kind, TransactionKind::from_label)?,
            category: parse_label("category", &self.category, Category::from_label)?,
            id: self.id,
            description: self.description,
            amount: self.amount,
            investment_id: non_empty(self.investment_id),
            recurring_id: non_empty(self.recurring_transaction_id),
        })
    }
}

impl InvestmentRow {
    fn to_record(self) -> Result<Investment> {
        Ok(Investment {
            kind: parse_label("type", &self.kind, InvestmentKind::from_label)?,
            start_date: parse_optional_date("start_date", self.start_date)?,
            id: self.id,
            name: self.name,
            current_value: self.current_value.unwrap_or(0.0),
            interest_rate: self.interest_rate,
            monthly_investment: self.monthly_investment,
            goal_id: non_empty(self.goal_id),
        })
    }
}

impl LoanRow {
    fn to_record(self) -> Result<Loan> {
        let mut loan = Loan {
            kind: parse_label("type", &self.kind, LoanKind::from_label)?,
            start_date: parse_date("start_date", &self.start_date)?,
            id: self.id,
            name: self.name,
            principal: self.principal,
            outstanding_amount: self.outstanding_amount,
            interest_rate: self.interest_rate,
            tenure_years: self.tenure,
            emi: 0.0,
            asset_current_value: self.asset_current_value,
        };
        // Missing EMI is derived from the loan terms
        loan.emi = match self.emi {
            Some(emi) if emi > 0.0 => emi,
            _ => loan.computed_emi(),
        };
        Ok(loan)
    }
}

impl GoalRow {
    fn to_record(self) -> Result<Goal> {
        Ok(Goal {
            deadline: parse_date("deadline", &self.deadline)?,
            id: self.id,
            name: self.name,
            target_amount: self.target_amount,
        })
    }
}

impl PolicyRow {
    fn to_record(self) -> Result<InsurancePolicy> {
        Ok(InsurancePolicy {
            kind: parse_label("type", &self.kind, InsuranceKind::from_label)?,
            premium_due_date: parse_date("premium_due_date", &self.premium_due_date)?,
            issue_date: parse_date("issue_date", &self.issue_date)?,
            expiry_date: parse_date("expiry_date", &self.expiry_date)?,
            id: self.id,
            policy_name: self.policy_name,
            sum_assured: self.sum_assured,
            premium_amount: self.premium_amount,
        })
    }
}

impl OtherAssetRow {
    fn to_record(self) -> Result<OtherAsset> {
        Ok(OtherAsset {
            id: self.id,
            name: self.name,
            value: self.value,
        })
    }
}

impl RecurringRow {
    fn to_record(self) -> Result<RecurringTransaction> {
        let start_date = parse_date("start_date", &self.start_date)?;
        Ok(RecurringTransaction {
            kind: parse_label("type", &self.kind, TransactionKind::from_label)?,
            category: parse_label("category", &self.category, Category::from_label)?,
            frequency: parse_label("frequency", &self.frequency, Frequency::from_label)?,
            next_due_date: parse_optional_date("next_due_date", self.next_due_date)?
                .unwrap_or(start_date),
            start_date,
            id: self.id,
            name: self.name,
            amount: self.amount,
        })
    }
}

fn read_rows<R, Row, T>(reader: R, convert: fn(Row) -> Result<T>) -> Result<Vec<T>>
where
    R: Read,
    Row: DeserializeOwned,
{
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: Row = result?;
        records.push(convert(row)?);
    }

    Ok(records)
}

pub fn load_transactions_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    read_rows(reader, TransactionRow::to_record)
}

pub fn load_investments_from_reader<R: Read>(reader: R) -> Result<Vec<Investment>> {
    read_rows(reader, InvestmentRow::to_record)
}

pub fn load_loans_from_reader<R: Read>(reader: R) -> Result<Vec<Loan>> {
    read_rows(reader, LoanRow::to_record)
}

pub fn load_goals_from_reader<R: Read>(reader: R) -> Result<Vec<Goal>> {
    read_rows(reader, GoalRow::to_record)
}

pub fn load_policies_from_reader<R: Read>(reader: R) -> Result<Vec<InsurancePolicy>> {
    read_rows(reader, PolicyRow::to_record)
}

pub fn load_other_assets_from_reader<R: Read>(reader: R) -> Result<Vec<OtherAsset>> {
    read_rows(reader, OtherAssetRow::to_record)
}

pub fn load_recurring_from_reader<R: Read>(reader: R) -> Result<Vec<RecurringTransaction>> {
    read_rows(reader, RecurringRow::to_record)
}

/// Budgets file has one `category,limit` row per budgeted category
pub fn load_budgets_from_reader<R: Read>(reader: R) -> Result<Budgets> {
    let rows = read_rows(reader, |row: BudgetRow| {
        let category = parse_label("category", &row.category, Category::from_label)?;
        Ok((category, row.limit))
    })?;
    Ok(rows.into_iter().collect())
}

/// Load all transactions from a CSV file
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    load_transactions_from_reader(std::fs::File::open(path)?)
}

pub fn load_investments<P: AsRef<Path>>(path: P) -> Result<Vec<Investment>> {
    load_investments_from_reader(std::fs::File::open(path)?)
}

pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<Loan>> {
    load_loans_from_reader(std::fs::File::open(path)?)
}

pub fn load_goals<P: AsRef<Path>>(path: P) -> Result<Vec<Goal>> {
    load_goals_from_reader(std::fs::File::open(path)?)
}

pub fn load_policies<P: AsRef<Path>>(path: P) -> Result<Vec<InsurancePolicy>> {
    load_policies_from_reader(std::fs::File::open(path)?)
}

pub fn load_other_assets<P: AsRef<Path>>(path: P) -> Result<Vec<OtherAsset>> {
    load_other_assets_from_reader(std::fs::File::open(path)?)
}

/// Load recurring bills; a blank `next_due_date` defaults to `start_date`
pub fn load_recurring<P: AsRef<Path>>(path: P) -> Result<Vec<RecurringTransaction>> {
    load_recurring_from_reader(std::fs::File::open(path)?)
}

pub fn load_budgets<P: AsRef<Path>>(path: P) -> Result<Budgets> {
    load_budgets_from_reader(std::fs::File::open(path)?)
}

fn load_optional<T, F>(dir: &Path, file: &str, load: F) -> Result<T>
where
    T: Default,
    F: FnOnce(std::fs::File) -> Result<T>,
{
    let path = dir.join(file);
    if !path.exists() {
        debug!("{} not present, using empty set", path.display());
        return Ok(T::default());
    }
    load(std::fs::File::open(&path)?)
}

impl Ledger {
    /// Load every record type from a ledger directory.
    ///
    /// # Arguments
    /// * `dir` - Directory holding `transactions.csv` and, optionally,
    ///   `investments.csv`, `loans.csv`, `goals.csv`, `insurance_policies.csv`,
    ///   `other_assets.csv`, `budgets.csv` and `recurring_transactions.csv`
    ///
    /// # Returns
    /// * `Ok(Ledger)` - Missing optional files load as empty collections
    /// * `Err(FinanceError::MissingFile)` - `transactions.csv` is absent
    /// * `Err(FinanceError::InvalidRecord)` - A row has an unknown label or bad date
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let transactions_path = dir.join(TRANSACTIONS_FILE);
        if !transactions_path.exists() {
            return Err(FinanceError::MissingFile(
                transactions_path.display().to_string(),
            ));
        }

        let ledger = Ledger {
            transactions: load_transactions(&transactions_path)?,
            investments: load_optional(dir, INVESTMENTS_FILE, load_investments_from_reader)?,
            goals: load_optional(dir, GOALS_FILE, load_goals_from_reader)?,
            loans: load_optional(dir, LOANS_FILE, load_loans_from_reader)?,
            policies: load_optional(dir, POLICIES_FILE, load_policies_from_reader)?,
            other_assets: load_optional(dir, OTHER_ASSETS_FILE, load_other_assets_from_reader)?,
            budgets: load_optional(dir, BUDGETS_FILE, load_budgets_from_reader)?,
            recurring: load_optional(dir, RECURRING_FILE, load_recurring_from_reader)?,
        };

        info!(
            "Loaded ledger from {}: {} transactions, {} investments, {} loans, {} policies",
            dir.display(),
            ledger.transactions.len(),
            ledger.investments.len(),
            ledger.loans.len(),
            ledger.policies.len(),
        );

        Ok(ledger)
    }
}
