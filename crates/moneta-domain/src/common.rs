//! Shared traits and calendar math for recurrence scheduling.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Index of the entity carrying `id`, if present.
pub fn position_of<T: Identifiable>(items: &[T], id: Uuid) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Sum of the amounts in the slice.
pub fn total_of<T: Amounted>(items: &[T]) -> f64 {
    items.iter().map(Amounted::amount).sum()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Cadence at which a recurring expense repeats.
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// Calculates the next occurrence strictly after `from`.
    ///
    /// Monthly and yearly steps keep the day-of-month where possible and
    /// clamp to the last valid day of the target month otherwise, so a
    /// Jan 31 monthly expense lands on the final day of February rather
    /// than rolling over into March.
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::weeks(1),
            Frequency::Monthly => add_months(from, 1),
            Frequency::Yearly => add_years(from, 1),
        }
    }

    /// Parses the lowercase wire label used in persisted records.
    pub fn parse(value: &str) -> Option<Frequency> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is valid")
}

fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).expect("clamped day is valid")
}

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("first of month is valid");
    (first_of_next - Duration::days(1)).day()
}
