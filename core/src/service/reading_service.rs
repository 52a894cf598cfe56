use chrono::NaiveDate;
use rand::Rng;

use crate::error::{Result, UtilityError};
use crate::model::reading::DailyUtilityRecord;
use crate::repository::ReadingRepository;
use crate::service::sample::{generate_sample_series, SAMPLE_DAYS};

pub struct ReadingService<R: ReadingRepository> {
    repo: R,
}

impl<R: ReadingRepository> ReadingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list_readings(&self) -> Result<Vec<DailyUtilityRecord>> {
        self.repo.list().map_err(UtilityError::unavailable)
    }

    /// Stores the day's consumption, replacing any reading already recorded for `date`.
    pub fn record_consumption(
        &self,
        date: NaiveDate,
        gas: f64,
        electricity: f64,
        water: f64,
        powder: f64,
        powder_type: Option<String>,
    ) -> Result<DailyUtilityRecord> {
        for (name, value) in [
            ("gas", gas),
            ("electricity", electricity),
            ("water", water),
            ("powder", powder),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(UtilityError::InvalidReading(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let powder_type = powder_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let record = DailyUtilityRecord::new(date, gas, electricity, water, powder, powder_type);
        let stored = self.repo.upsert(record).map_err(UtilityError::write_failed)?;
        tracing::debug!(date = %stored.date, id = %stored.id, "recorded consumption");
        Ok(stored)
    }

    /// Writes a week of sample readings ending at `today` when the store is empty.
    /// Returns how many readings were written.
    pub fn seed_if_empty(&self, today: NaiveDate) -> Result<usize> {
        self.seed_if_empty_with(today, &mut rand::thread_rng())
    }

    pub fn seed_if_empty_with<G: Rng + ?Sized>(
        &self,
        today: NaiveDate,
        rng: &mut G,
    ) -> Result<usize> {
        if !self.list_readings()?.is_empty() {
            return Ok(0);
        }

        let samples = generate_sample_series(today, SAMPLE_DAYS, rng);
        let count = samples.len();
        for record in samples {
            self.repo.upsert(record).map_err(UtilityError::write_failed)?;
        }
        tracing::info!(count, "seeded empty reading store with sample data");
        Ok(count)
    }
}
