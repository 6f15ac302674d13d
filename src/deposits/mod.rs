//! Fixed and recurring deposit valuation

mod fixed;
mod recurring;

pub use fixed::{CompoundingFrequency, fixed_deposit_value, fixed_deposit_maturity, DAYS_PER_YEAR};
pub use recurring::{completed_months, recurring_deposit_value, recurring_deposit_maturity};
