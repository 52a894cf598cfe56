use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::trailing_days;
use crate::model::series::{DailyReading, NormalizedSeries, SeriesPoint};

/// Builds a gap-filled, date-ascending series covering the `window_days` calendar days
/// that end at and include `reference_date`.
///
/// Readings outside the window (including ones dated after `reference_date`) are ignored.
/// Days without a reading become zero-valued placeholders, so the result holds exactly
/// `window_days` points. The only exception is a window reaching past the earliest
/// representable date, which is cut short there. Callers going through
/// [`crate::calendar::WindowDays::start_date`] never see that case.
///
/// If the input has several readings for one date, the one appearing last in input
/// order is used.
///
/// Inputs are copied; the result never aliases them.
pub fn normalize<T: DailyReading>(
    records: &[T],
    window_days: usize,
    reference_date: NaiveDate,
) -> NormalizedSeries {
    let window: Vec<NaiveDate> = trailing_days(reference_date, window_days).collect();
    let Some(&oldest) = window.last() else {
        return NormalizedSeries {
            window_days,
            reference_date,
            points: Vec::new(),
        };
    };

    // Select
    let mut by_date: BTreeMap<NaiveDate, SeriesPoint> = BTreeMap::new();
    for record in records {
        let date = record.date();
        if date < oldest || date > reference_date {
            continue;
        }
        if by_date.insert(date, record.to_point()).is_some() {
            tracing::warn!(date = %date, "several readings for one date, keeping the last");
        }
    }

    // Gap-fill
    let real = by_date.len();
    for date in window {
        by_date.entry(date).or_insert_with(|| SeriesPoint::placeholder(date));
    }
    tracing::debug!(window_days, real, filled = by_date.len() - real, "normalized series");

    // BTreeMap iterates ascending; keep the newest `window_days`.
    let points: Vec<SeriesPoint> = by_date.into_values().collect();
    let skip = points.len().saturating_sub(window_days);

    NormalizedSeries {
        window_days,
        reference_date,
        points: points.into_iter().skip(skip).collect(),
    }
}
