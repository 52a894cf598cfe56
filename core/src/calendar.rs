use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::UtilityError;

/// A calendar month, compared by (year, month) only.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month immediately before this one. January rolls back to December of the prior year.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Longest accepted window, roughly ten years.
pub const MAX_WINDOW_DAYS: usize = 3660;

/// A validated window length in days, between 1 and [`MAX_WINDOW_DAYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDays(usize);

impl WindowDays {
    pub const WEEK: WindowDays = WindowDays(7);
    pub const MONTH: WindowDays = WindowDays(30);

    pub fn new(days: i64) -> Result<Self, UtilityError> {
        if days <= 0 {
            return Err(UtilityError::InvalidWindow(format!(
                "window must be a positive number of days, got {}",
                days
            )));
        }
        match usize::try_from(days) {
            Ok(days) if days <= MAX_WINDOW_DAYS => Ok(WindowDays(days)),
            _ => Err(UtilityError::InvalidWindow(format!(
                "window of {} days exceeds the maximum of {}",
                days, MAX_WINDOW_DAYS
            ))),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// First day of the window ending at `reference`. Fails when that day would fall
    /// before the earliest representable date.
    pub fn start_date(self, reference: NaiveDate) -> Result<NaiveDate, UtilityError> {
        let back = u64::try_from(self.0.saturating_sub(1)).unwrap_or(u64::MAX);
        reference.checked_sub_days(Days::new(back)).ok_or_else(|| {
            UtilityError::InvalidWindow(format!(
                "{} window ending {} starts out of range",
                self, reference
            ))
        })
    }
}

impl Default for WindowDays {
    fn default() -> Self {
        WindowDays::WEEK
    }
}

impl fmt::Display for WindowDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

impl FromStr for WindowDays {
    type Err = UtilityError;

    // Accepts "7", "30", "7d", "30D".
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let num_str = trimmed
            .strip_suffix('d')
            .or_else(|| trimmed.strip_suffix('D'))
            .unwrap_or(trimmed);
        let days: i64 = num_str.parse().map_err(|_| {
            UtilityError::InvalidWindow(format!("not a whole number of days: '{}'", input))
        })?;
        WindowDays::new(days)
    }
}

/// The trailing `days` calendar days ending at and including `reference`, newest first.
///
/// Stops early only at the minimum representable date.
pub fn trailing_days(reference: NaiveDate, days: usize) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(reference), |d| d.pred_opt()).take(days)
}

/// Parses a reference date relative to `today`.
///
/// Supported forms: `today`, `yesterday`, `-Nd` and `YYYY-MM-DD`.
pub fn parse_reference_date(input: &str, today: NaiveDate) -> Result<NaiveDate, UtilityError> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => {
            return today
                .pred_opt()
                .ok_or_else(|| UtilityError::InvalidDate(input.to_string()))
        }
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('-') {
        if let Some(num_str) = rest.strip_suffix('d') {
            // Unsigned so "--3d" cannot point into the future.
            let count: u32 = num_str.parse().map_err(|_| {
                UtilityError::InvalidDate(format!("invalid relative date '{}'", input))
            })?;
            return today
                .checked_sub_days(Days::new(u64::from(count)))
                .ok_or_else(|| {
                    UtilityError::InvalidDate(format!("date out of range: '{}'", input))
                });
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| UtilityError::InvalidDate(format!("could not parse date '{}'", input)))
}
