use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month parsed from a `YYYYMM` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

/// First and last day of a month, both formatted as `YYYYMMDD`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MonthRange {
    pub start: String,
    pub end: String,
}

/// Parse a `YYYYMM` string into a [`Month`]
///
/// Accepts exactly six ASCII digits with a month part between 01 and 12.
/// Returns `None` for anything else.
pub fn parse_month(input: &str) -> Option<Month> {
    if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = input[..4].parse::<i32>().ok()?;
    let month = input[4..].parse::<u32>().ok()?;

    if !(1..=12).contains(&month) {
        return None;
    }

    Some(Month { year, month })
}

/// Number of days in the given month, leap years included
pub fn days_in_month(month: Month) -> u32 {
    let (next_year, next_month) = if month.month == 12 {
        (month.year + 1, 1)
    } else {
        (month.year, month.month + 1)
    };

    // Day before the 1st of the following month.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Compute the `YYYYMMDD` range covering the whole month
pub fn month_range(month: Month) -> MonthRange {
    let prefix = format!("{:04}{:02}", month.year, month.month);

    MonthRange {
        start: format!("{prefix}01"),
        end: format!("{prefix}{:02}", days_in_month(month)),
    }
}

impl MonthRange {
    /// The `YYYYMM` month the range starts in
    pub fn month(&self) -> &str {
        &self.start[..6]
    }
}
