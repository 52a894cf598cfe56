use crate::model::reading::DailyUtilityRecord;
use anyhow::Result;

/// Canonical collection of daily readings, at most one per date.
pub trait ReadingRepository {
    /// All known readings, in no particular order. An empty store is `Ok(vec![])`.
    fn list(&self) -> Result<Vec<DailyUtilityRecord>>;

    /// Replaces the quantities of the reading stored for `record.date`, keeping its
    /// `id` and `created_at`, or stores `record` as new. Returns the stored reading.
    fn upsert(&self, record: DailyUtilityRecord) -> Result<DailyUtilityRecord>;
}
