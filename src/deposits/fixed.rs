//! Fixed deposit compounding
//!
//! A = P(1 + r/n)^(n t), with t measured in years of 365.25 days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average Gregorian year length used for elapsed deposit time
pub const DAYS_PER_YEAR: f64 = 365.25;

/// How often interest is compounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Monthly,
    /// Bank standard for term deposits
    #[default]
    Quarterly,
    HalfYearly,
    Yearly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::HalfYearly => 2,
            CompoundingFrequency::Yearly => 1,
        }
    }

    /// Parse a case-insensitive label such as "quarterly" or "half-yearly"
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(CompoundingFrequency::Monthly),
            "quarterly" => Some(CompoundingFrequency::Quarterly),
            "half-yearly" | "halfyearly" | "semiannual" => Some(CompoundingFrequency::HalfYearly),
            "yearly" | "annual" => Some(CompoundingFrequency::Yearly),
            _ => None,
        }
    }
}

/// Value of a fixed deposit on `as_of`.
///
/// Non-positive principal or rate, or a start date on/after `as_of`,
/// leaves the principal unchanged.
pub fn fixed_deposit_value(
    principal: f64,
    annual_rate_pct: f64,
    start_date: NaiveDate,
    as_of: NaiveDate,
    frequency: CompoundingFrequency,
) -> f64 {
    if principal <= 0.0 || annual_rate_pct <= 0.0 {
        return principal;
    }

    let years = (as_of - start_date).num_days() as f64 / DAYS_PER_YEAR;
    if years <= 0.0 {
        return principal;
    }

    compound(principal, annual_rate_pct, years, frequency)
}

/// Maturity value after a fixed tenure in months
pub fn fixed_deposit_maturity(
    principal: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
    frequency: CompoundingFrequency,
) -> f64 {
    if principal <= 0.0 || annual_rate_pct <= 0.0 || tenure_months == 0 {
        return principal;
    }
    compound(principal, annual_rate_pct, tenure_months as f64 / 12.0, frequency)
}

fn compound(principal: f64, annual_rate_pct: f64, years: f64, frequency: CompoundingFrequency) -> f64 {
    let n = frequency.periods_per_year() as f64;
    let rate = annual_rate_pct / 100.0;
    principal * (1.0 + rate / n).powf(n * years)
}
