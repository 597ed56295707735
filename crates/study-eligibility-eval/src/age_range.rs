//! Age-range rule
//!
//! Study bounds are given in years, months and days and converted with fixed
//! 365-day years and 30-day months. Both bounds are inclusive.

use crate::study::StudyEligibilitySpec;
use chrono::NaiveDate;

pub const DAYS_PER_YEAR: i64 = 365;
pub const DAYS_PER_MONTH: i64 = 30;

/// `years * 365 + months * 30 + days`
pub fn days_from_parts(years: u32, months: u32, days: u32) -> i64 {
    i64::from(years) * DAYS_PER_YEAR + i64::from(months) * DAYS_PER_MONTH + i64::from(days)
}

/// Inclusive `(lower, upper)` age bounds of a study, in days
pub fn age_in_days_bounds(spec: &StudyEligibilitySpec) -> (i64, i64) {
    (
        days_from_parts(spec.min_age_years, spec.min_age_months, spec.min_age_days),
        days_from_parts(spec.max_age_years, spec.max_age_months, spec.max_age_days),
    )
}

pub fn is_in_range(age_in_days: i64, lower: i64, upper: i64) -> bool {
    lower <= age_in_days && age_in_days <= upper
}

/// Distance outside the range: `0` inside, negative when too young, positive
/// when too old
pub fn signed_day_offset(age_in_days: i64, lower: i64, upper: i64) -> i64 {
    if age_in_days < lower {
        age_in_days.saturating_sub(lower)
    } else if age_in_days > upper {
        age_in_days.saturating_sub(upper)
    } else {
        0
    }
}

/// Calendar days from `birthday` to `today`; negative for a future birthday
pub fn age_in_days_from_birthday(birthday: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(birthday).num_days()
}
