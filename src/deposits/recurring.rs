//! Recurring deposit valuation
//!
//! Each monthly instalment compounds monthly from its deposit month; only
//! completed calendar months count.

use chrono::{Datelike, NaiveDate};

/// Whole calendar months between `start` and `as_of`.
///
/// A month is incomplete until `as_of` reaches the start's day of month.
pub fn completed_months(start: NaiveDate, as_of: NaiveDate) -> u32 {
    let years = as_of.year() - start.year();
    let mut months = years * 12 + as_of.month() as i32 - start.month() as i32;
    if as_of.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Value on `as_of` of a recurring deposit of `monthly` per month.
///
/// With a non-positive rate the instalments are returned without interest.
pub fn recurring_deposit_value(
    monthly: f64,
    annual_rate_pct: f64,
    start_date: NaiveDate,
    as_of: NaiveDate,
) -> f64 {
    if monthly <= 0.0 {
        return 0.0;
    }

    let months = completed_months(start_date, as_of);
    if months == 0 {
        return 0.0;
    }

    if annual_rate_pct <= 0.0 {
        return monthly * months as f64;
    }

    let i = annual_rate_pct / 100.0 / 12.0;
    (0..months)
        .map(|deposited| monthly * (1.0 + i).powi((months - deposited) as i32))
        .sum()
}

/// Maturity value after `months` instalments (future value of an annuity due)
pub fn recurring_deposit_maturity(monthly: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if monthly <= 0.0 || months == 0 {
        return 0.0;
    }
    if annual_rate_pct <= 0.0 {
        return monthly * months as f64;
    }

    let i = annual_rate_pct / 100.0 / 12.0;
    monthly * ((1.0 + i).powi(months as i32) - 1.0) / i * (1.0 + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_completed_months() {
        let start = date(2023, 7, 5);
        assert_eq!(completed_months(start, date(2023, 10, 4)), 2);
        assert_eq!(completed_months(start, date(2023, 10, 5)), 3);
        assert_eq!(completed_months(start, date(2024, 7, 5)), 12);
        assert_eq!(completed_months(start, date(2023, 7, 20)), 0);
        assert_eq!(completed_months(start, date(2022, 1, 1)), 0);
    }

    #[test]
    fn test_one_year_rd_value() {
        let value = recurring_deposit_value(5000.0, 7.0, date(2023, 7, 5), date(2024, 7, 5));
        assert_abs_diff_eq!(value, 62_324.3769, epsilon = 1e-3);
    }

    #[test]
    fn test_summation_matches_closed_form() {
        let summed = recurring_deposit_value(2500.0, 6.25, date(2020, 1, 31), date(2023, 8, 31));
        let months = completed_months(date(2020, 1, 31), date(2023, 8, 31));
        let closed = recurring_deposit_maturity(2500.0, 6.25, months);
        assert_abs_diff_eq!(summed, closed, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_and_empty_cases() {
        assert_eq!(recurring_deposit_value(1000.0, 0.0, date(2023, 1, 1), date(2023, 6, 1)), 5000.0);
        assert_eq!(recurring_deposit_value(0.0, 7.0, date(2023, 1, 1), date(2023, 6, 1)), 0.0);
        assert_eq!(recurring_deposit_value(1000.0, 7.0, date(2023, 1, 1), date(2023, 1, 20)), 0.0);
    }
}
