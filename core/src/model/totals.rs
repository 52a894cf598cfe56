use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::model::reading::{quantity_or_zero, DailyUtilityRecord};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct UtilityTotals {
    pub gas: f64,
    pub electricity: f64,
    pub water: f64,
    pub powder: f64,
}

impl UtilityTotals {
    pub fn add(&mut self, gas: f64, electricity: f64, water: f64, powder: f64) {
        self.gas += quantity_or_zero(gas);
        self.electricity += quantity_or_zero(electricity);
        self.water += quantity_or_zero(water);
        self.powder += quantity_or_zero(powder);
    }

    pub fn add_record(&mut self, record: &DailyUtilityRecord) {
        self.add(record.gas, record.electricity, record.water, record.powder);
    }

    pub fn is_zero(&self) -> bool {
        *self == UtilityTotals::default()
    }
}

/// Percentage change per utility. `None` where the baseline is zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct UtilityChange {
    pub gas: Option<f64>,
    pub electricity: Option<f64>,
    pub water: Option<f64>,
    pub powder: Option<f64>,
}

fn percent_change(current: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some((current - baseline) * 100.0 / baseline)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub current_month: YearMonth,
    pub previous_month: YearMonth,
    pub this_month: UtilityTotals,
    pub last_month: UtilityTotals,
}

impl MonthlyTotals {
    pub fn new(current_month: YearMonth) -> Self {
        Self {
            current_month,
            previous_month: current_month.previous(),
            this_month: UtilityTotals::default(),
            last_month: UtilityTotals::default(),
        }
    }

    /// Month-over-month change of this month against last month.
    pub fn change(&self) -> UtilityChange {
        UtilityChange {
            gas: percent_change(self.this_month.gas, self.last_month.gas),
            electricity: percent_change(self.this_month.electricity, self.last_month.electricity),
            water: percent_change(self.this_month.water, self.last_month.water),
            powder: percent_change(self.this_month.powder, self.last_month.powder),
        }
    }
}
