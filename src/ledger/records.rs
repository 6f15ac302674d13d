//! Domain records tracked by the ledger

use crate::deposits::completed_months;
use crate::loans::{amortization_schedule, calculate_emi};
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Display labels and lenient parsing for ledger enums.
/// Parsing accepts either the display label or the variant name.
macro_rules! labelled {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                let wanted = label.trim();
                match wanted {
                    $(_ if wanted.eq_ignore_ascii_case($label)
                        || wanted.eq_ignore_ascii_case(stringify!($variant)) => Some($ty::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.label())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

labelled!(TransactionKind {
    Income => "Income",
    Expense => "Expense",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Housing,
    Salary,
    /// Money moved into an investment; linked by `investment_id`
    Investment,
    Other,
}

labelled!(Category {
    Food => "Food",
    Transport => "Transport",
    Shopping => "Shopping",
    Bills => "Bills",
    Entertainment => "Entertainment",
    Health => "Health",
    Housing => "Housing",
    Salary => "Salary",
    Investment => "Investment",
    Other => "Other",
});

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Always positive; direction comes from `kind`
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    #[serde(default)]
    pub investment_id: Option<String>,
    #[serde(default)]
    pub recurring_id: Option<String>,
}

impl Transaction {
    /// Amount with income positive and expense negative
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentKind {
    Stocks,
    MutualFunds,
    Crypto,
    FixedDeposit,
    RecurringDeposit,
}

labelled!(InvestmentKind {
    Stocks => "Stocks",
    MutualFunds => "Mutual Funds",
    Crypto => "Cryptocurrency",
    FixedDeposit => "Fixed Deposit",
    RecurringDeposit => "Recurring Deposit",
});

/// A holding. Invested amounts come from linked transactions, not the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,
    pub name: String,
    pub kind: InvestmentKind,
    /// Last known market value; recomputed for FD/RD
    pub current_value: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Annual percentage, FD/RD only
    #[serde(default)]
    pub interest_rate: Option<f64>,
    /// RD instalment
    #[serde(default)]
    pub monthly_investment: Option<f64>,
    #[serde(default)]
    pub goal_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceKind {
    Life,
    Health,
    Vehicle,
    Home,
}

labelled!(InsuranceKind {
    Life => "Life Insurance",
    Health => "Health Insurance",
    Vehicle => "Vehicle Insurance",
    Home => "Home Insurance",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: String,
    pub policy_name: String,
    pub kind: InsuranceKind,
    pub sum_assured: f64,
    pub premium_amount: f64,
    pub premium_due_date: NaiveDate,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanKind {
    Personal,
    Home,
    Car,
    Education,
}

labelled!(LoanKind {
    Personal => "Personal Loan",
    Home => "Home Loan",
    Car => "Car Loan",
    Education => "Education Loan",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub name: String,
    pub kind: LoanKind,
    pub principal: f64,
    pub outstanding_amount: f64,
    /// Annual percentage
    pub interest_rate: f64,
    pub tenure_years: u32,
    pub emi: f64,
    pub start_date: NaiveDate,
    /// Market value of the financed asset, if any
    #[serde(default)]
    pub asset_current_value: Option<f64>,
}

impl Loan {
    pub fn tenure_months(&self) -> u32 {
        self.tenure_years.saturating_mul(12)
    }

    /// EMI implied by principal, rate and tenure
    pub fn computed_emi(&self) -> f64 {
        calculate_emi(self.principal, self.interest_rate, self.tenure_months())
    }

    /// Instalments fallen due by `as_of`, capped at the tenure
    pub fn months_elapsed(&self, as_of: NaiveDate) -> u32 {
        completed_months(self.start_date, as_of).min(self.tenure_months())
    }

    pub fn remaining_months(&self, as_of: NaiveDate) -> u32 {
        self.tenure_months() - self.months_elapsed(as_of)
    }

    /// Scheduled balance on `as_of` if every EMI was paid on time
    pub fn projected_outstanding(&self, as_of: NaiveDate) -> f64 {
        amortization_schedule(self.principal, self.interest_rate, self.tenure_months())
            .balance_after(self.months_elapsed(as_of))
    }

    /// Owner's equity in the financed asset
    pub fn equity(&self) -> Option<f64> {
        self.asset_current_value
            .map(|value| value - self.outstanding_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherAsset {
    pub id: String,
    pub name: String,
    pub value: f64,
}

/// Monthly spending limit per category
pub type Budgets = BTreeMap<Category, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

labelled!(Frequency {
    Daily => "Daily",
    Weekly => "Weekly",
    Monthly => "Monthly",
    Yearly => "Yearly",
});

impl Frequency {
    /// The `k`-th occurrence counted from `anchor` (`k = 0` is the anchor).
    /// Month and year steps are taken from the anchor and clamp to month end,
    /// so a schedule on the 31st lands on Feb 29 and then Mar 31.
    pub fn nth(&self, anchor: NaiveDate, k: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => anchor.checked_add_signed(Duration::try_days(k as i64)?),
            Frequency::Weekly => anchor.checked_add_signed(Duration::try_weeks(k as i64)?),
            Frequency::Monthly => anchor.checked_add_months(Months::new(k)),
            Frequency::Yearly => anchor.checked_add_months(Months::new(k.checked_mul(12)?)),
        }
    }

    /// Next occurrence after `date`, clamped to month end for month steps
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        self.nth(date, 1).unwrap_or(NaiveDate::MAX)
    }
}

/// A bill or income that repeats on a schedule anchored at `start_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
}

/// Everything the engine needs for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
    pub goals: Vec<Goal>,
    pub loans: Vec<Loan>,
    pub policies: Vec<InsurancePolicy>,
    pub other_assets: Vec<OtherAsset>,
    pub budgets: Budgets,
    pub recurring: Vec<RecurringTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn home_loan() -> Loan {
        Loan {
            id: "l1".into(),
            name: "Home Loan".into(),
            kind: LoanKind::Home,
            principal: 5_000_000.0,
            outstanding_amount: 4_800_000.0,
            interest_rate: 8.5,
            tenure_years: 20,
            emi: 43_391.0,
            start_date: date(2022, 7, 1),
            asset_current_value: Some(6_000_000.0),
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for kind in InvestmentKind::ALL {
            assert_eq!(InvestmentKind::from_label(kind.label()), Some(*kind));
        }
        assert_eq!(InvestmentKind::from_label("MutualFunds"), Some(InvestmentKind::MutualFunds));
        assert_eq!(Category::from_label(" food "), Some(Category::Food));
        assert_eq!(LoanKind::from_label("Boat Loan"), None);
    }

    #[test]
    fn test_loan_progress() {
        let loan = home_loan();
        assert!((loan.computed_emi() - 43_391.16).abs() < 0.01);
        assert_eq!(loan.months_elapsed(date(2023, 7, 1)), 12);
        assert_eq!(loan.remaining_months(date(2023, 7, 1)), 228);
        assert_eq!(loan.months_elapsed(date(2050, 1, 1)), 240);

        let balance = loan.projected_outstanding(date(2023, 7, 1));
        assert!(balance < 5_000_000.0 && balance > 4_800_000.0);
        assert_eq!(loan.equity(), Some(1_200_000.0));
    }

    #[test]
    fn test_frequency_advance_clamps_month_end() {
        assert_eq!(Frequency::Monthly.advance(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(Frequency::Yearly.advance(date(2024, 2, 29)), date(2025, 2, 28));
        assert_eq!(Frequency::Weekly.advance(date(2024, 12, 28)), date(2025, 1, 4));
        assert_eq!(Frequency::Daily.advance(date(2024, 12, 31)), date(2025, 1, 1));
    }

    #[test]
    fn test_nth_counts_from_the_anchor() {
        let anchor = date(2024, 1, 31);
        assert_eq!(Frequency::Monthly.nth(anchor, 1), Some(date(2024, 2, 29)));
        assert_eq!(Frequency::Monthly.nth(anchor, 2), Some(date(2024, 3, 31)));
        assert_eq!(Frequency::Monthly.nth(anchor, 11), Some(date(2024, 12, 31)));
        assert_eq!(Frequency::Yearly.nth(date(2024, 2, 29), 4), Some(date(2028, 2, 29)));
        assert_eq!(Frequency::Weekly.nth(anchor, 0), Some(anchor));
        assert_eq!(Frequency::Daily.nth(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_oversized_tenure_saturates() {
        let loan = Loan {
            tenure_years: u32::MAX,
            ..home_loan()
        };
        assert_eq!(loan.tenure_months(), u32::MAX);
    }

    #[test]
    fn test_signed_amount() {
        let t = Transaction {
            id: "t".into(),
            date: date(2024, 3, 2),
            description: "Groceries".into(),
            amount: 2500.0,
            kind: TransactionKind::Expense,
            category: Category::Food,
            investment_id: None,
            recurring_id: None,
        };
        assert_eq!(t.signed_amount(), -2500.0);
        assert!(t.in_month(2024, 3));
    }
}
