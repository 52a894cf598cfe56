use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::model::reading::DailyUtilityRecord;
use crate::repository::traits::ReadingRepository;

pub(crate) type ReadingMap = BTreeMap<NaiveDate, DailyUtilityRecord>;

pub(crate) fn upsert_by_date(
    readings: &mut ReadingMap,
    record: DailyUtilityRecord,
) -> DailyUtilityRecord {
    match readings.get_mut(&record.date) {
        Some(existing) => {
            existing.apply_update(&record);
            existing.clone()
        }
        None => {
            readings.insert(record.date, record.clone());
            record
        }
    }
}

/// Keeps readings in process memory only.
#[derive(Default)]
pub struct InMemoryReadingRepository {
    readings: RwLock<ReadingMap>,
}

impl InMemoryReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readings(records: impl IntoIterator<Item = DailyUtilityRecord>) -> Self {
        let repo = Self::new();
        if let Ok(mut readings) = repo.readings.write() {
            for record in records {
                upsert_by_date(&mut readings, record);
            }
        }
        repo
    }
}

impl ReadingRepository for InMemoryReadingRepository {
    fn list(&self) -> Result<Vec<DailyUtilityRecord>> {
        let readings = self
            .readings
            .read()
            .map_err(|_| anyhow!("reading store lock poisoned"))?;
        Ok(readings.values().cloned().collect())
    }

    fn upsert(&self, record: DailyUtilityRecord) -> Result<DailyUtilityRecord> {
        let mut readings = self
            .readings
            .write()
            .map_err(|_| anyhow!("reading store lock poisoned"))?;
        Ok(upsert_by_date(&mut readings, record))
    }
}
