//! Synthetic readings for bootstrapping an empty store.

use chrono::NaiveDate;
use rand::Rng;

use crate::calendar::trailing_days;
use crate::model::reading::DailyUtilityRecord;

/// Days of sample data written by `seed_if_empty`.
pub const SAMPLE_DAYS: usize = 7;

// Half-open ranges of whole units: m³, kWh, m³, kg.
const GAS_RANGE: std::ops::Range<u32> = 200..300;
const ELECTRICITY_RANGE: std::ops::Range<u32> = 1500..2000;
const WATER_RANGE: std::ops::Range<u32> = 80..100;
const POWDER_RANGE: std::ops::Range<u32> = 5..15;

/// One reading per day for the `days` days ending at `today`, oldest first.
pub fn generate_sample_series<G: Rng + ?Sized>(
    today: NaiveDate,
    days: usize,
    rng: &mut G,
) -> Vec<DailyUtilityRecord> {
    let mut dates: Vec<NaiveDate> = trailing_days(today, days).collect();
    dates.reverse();

    dates
        .into_iter()
        .map(|date| {
            DailyUtilityRecord::new(
                date,
                rng.gen_range(GAS_RANGE) as f64,
                rng.gen_range(ELECTRICITY_RANGE) as f64,
                rng.gen_range(WATER_RANGE) as f64,
                rng.gen_range(POWDER_RANGE) as f64,
                None,
            )
        })
        .collect()
}
