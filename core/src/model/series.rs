use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::reading::{quantity_or_zero, DailyUtilityRecord};
use crate::model::totals::UtilityTotals;

/// A single day in a normalized series: either a copy of a stored reading or a zero-filled gap.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub gas: f64,
    pub electricity: f64,
    pub water: f64,
    pub powder: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powder_type: Option<String>,
    /// True when no reading existed for this date.
    pub filled: bool,
}

impl SeriesPoint {
    pub fn placeholder(date: NaiveDate) -> Self {
        Self {
            date,
            gas: 0.0,
            electricity: 0.0,
            water: 0.0,
            powder: 0.0,
            powder_type: None,
            filled: true,
        }
    }
}

/// Anything that can be projected onto a day of a series.
pub trait DailyReading {
    fn date(&self) -> NaiveDate;
    fn to_point(&self) -> SeriesPoint;
}

impl DailyReading for DailyUtilityRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn to_point(&self) -> SeriesPoint {
        SeriesPoint {
            date: self.date,
            gas: quantity_or_zero(self.gas),
            electricity: quantity_or_zero(self.electricity),
            water: quantity_or_zero(self.water),
            powder: quantity_or_zero(self.powder),
            powder_type: self.powder_type.clone(),
            filled: false,
        }
    }
}

impl DailyReading for SeriesPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn to_point(&self) -> SeriesPoint {
        self.clone()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeries {
    pub window_days: usize,
    pub reference_date: NaiveDate,
    pub points: Vec<SeriesPoint>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesPoint> {
        self.points.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Number of days that were zero-filled.
    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|p| p.filled).count()
    }

    pub fn totals(&self) -> UtilityTotals {
        let mut totals = UtilityTotals::default();
        for point in &self.points {
            totals.add(point.gas, point.electricity, point.water, point.powder);
        }
        totals
    }
}

impl<'a> IntoIterator for &'a NormalizedSeries {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
