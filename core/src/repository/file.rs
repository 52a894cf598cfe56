use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::model::reading::DailyUtilityRecord;
use crate::repository::memory::{upsert_by_date, ReadingMap};
use crate::repository::traits::ReadingRepository;

const READINGS_FILE_NAME: &str = "readings.json";

/// Default data directory, `~/.utilboard`.
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".utilboard"))
}

/// Stores readings as a JSON array sorted by date.
#[derive(Clone)]
pub struct FileReadingRepository {
    file_path: PathBuf,
    // Serializes read-modify-write cycles from this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileReadingRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("creating data directory {}", path.display()))?;
        path.push(READINGS_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<DailyUtilityRecord>::new())?;
            writer.flush()?;
        }

        Ok(FileReadingRepository {
            file_path: path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_values(&self) -> Result<Vec<Value>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let values: Vec<Value> = serde_json::from_reader(reader)
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        Ok(values)
    }

    /// Loads the canonical map. Rows that cannot be placed on a date are kept
    /// verbatim so a rewrite does not lose them.
    fn load(&self) -> Result<LoadedReadings> {
        let mut loaded = LoadedReadings::default();

        for (index, value) in self.read_values()?.into_iter().enumerate() {
            let record: DailyUtilityRecord = match serde_json::from_value(value.clone()) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(index, error = %e, "keeping unreadable reading as is");
                    loaded.unplaced.push(value);
                    continue;
                }
            };

            let keep = match loaded.readings.get(&record.date) {
                Some(kept) => {
                    loaded.duplicates += 1;
                    tracing::warn!(date = %record.date, "duplicate reading for date");
                    // Newest created_at wins; later rows win ties.
                    record.created_at >= kept.created_at
                }
                None => true,
            };
            if keep {
                loaded.readings.insert(record.date, record);
            }
        }

        Ok(loaded)
    }

    /// Writes the readings sorted by date, followed by the unplaced rows.
    fn write_readings(&self, readings: &ReadingMap, unplaced: &[Value]) -> Result<()> {
        let mut rows = Vec::with_capacity(readings.len() + unplaced.len());
        for record in readings.values() {
            rows.push(serde_json::to_value(record)?);
        }
        rows.extend(unplaced.iter().cloned());

        let tmp_path = self.file_path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)
                .with_context(|| format!("creating {}", tmp_path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("replacing {}", self.file_path.display()))?;
        Ok(())
    }

    /// Rewrites the file with one reading per date. Returns how many rows were removed.
    pub fn cleanup_duplicates(&self) -> Result<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("reading store lock poisoned"))?;
        let loaded = self.load()?;
        if loaded.duplicates > 0 {
            self.write_readings(&loaded.readings, &loaded.unplaced)?;
            tracing::info!(removed = loaded.duplicates, "cleaned up duplicate readings");
        }
        Ok(loaded.duplicates)
    }
}

#[derive(Default)]
struct LoadedReadings {
    readings: ReadingMap,
    unplaced: Vec<Value>,
    duplicates: usize,
}

impl ReadingRepository for FileReadingRepository {
    fn list(&self) -> Result<Vec<DailyUtilityRecord>> {
        Ok(self.load()?.readings.into_values().collect())
    }

    fn upsert(&self, record: DailyUtilityRecord) -> Result<DailyUtilityRecord> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("reading store lock poisoned"))?;
        let mut loaded = self.load()?;
        let stored = upsert_by_date(&mut loaded.readings, record);
        self.write_readings(&loaded.readings, &loaded.unplaced)?;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use tempfile::tempdir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_new_creates_empty_store() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(repo.file_path().exists());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_persists_sorted_and_keyed_by_date() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();

        repo.upsert(DailyUtilityRecord::new(date(3), 30.0, 0.0, 0.0, 0.0, None))
            .unwrap();
        let first = repo
            .upsert(DailyUtilityRecord::new(date(1), 10.0, 0.0, 0.0, 0.0, None))
            .unwrap();
        repo.upsert(DailyUtilityRecord::new(date(1), 15.0, 5.0, 0.0, 0.0, None))
            .unwrap();

        let reopened = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let all = reopened.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].date, date(1));
        assert_eq!(all[0].gas, 15.0);
        assert_eq!(all[0].electricity, 5.0);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].date, date(3));

        let raw: Vec<Value> =
            serde_json::from_str(&fs::read_to_string(reopened.file_path()).unwrap()).unwrap();
        assert_eq!(raw[0]["date"], "2024-03-01");
        assert_eq!(raw[1]["date"], "2024-03-03");
    }

    fn read_raw(repo: &FileReadingRepository) -> Vec<Value> {
        serde_json::from_str(&fs::read_to_string(repo.file_path()).unwrap()).unwrap()
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(
            repo.file_path(),
            r#"[
                {"date": "2024-03-01", "total_gas": 12},
                {"date": "not a date", "gas": 1},
                {"gas": 4},
                {"date": "2024-03-02", "gas": "n/a", "water": 3}
            ]"#,
        )
        .unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].gas, 12.0);
        assert_eq!(all[1].gas, 0.0);
        assert_eq!(all[1].water, 3.0);
    }

    #[test]
    fn test_rows_with_odd_fields_survive_an_unrelated_upsert() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(
            repo.file_path(),
            r#"[
                {"date": "2024-03-01", "gas": 5, "powderType": 3},
                {"date": "2024-03-02", "gas": 6, "createdAt": "2024-03-02T10:00:00"}
            ]"#,
        )
        .unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].gas, 5.0);
        assert_eq!(listed[1].gas, 6.0);

        repo.upsert(DailyUtilityRecord::new(date(5), 7.0, 0.0, 0.0, 0.0, None))
            .unwrap();

        let dates: Vec<NaiveDate> = repo.list().unwrap().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(5)]);
        let raw = read_raw(&repo);
        assert_eq!(raw[0]["gas"], 5.0);
        assert_eq!(raw[1]["gas"], 6.0);
    }

    #[test]
    fn test_unplaceable_rows_are_written_back_unchanged() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(
            repo.file_path(),
            r#"[
                {"date": "not a date", "gas": 1},
                {"date": "2024-03-01", "gas": 2},
                {"gas": 4, "note": "kept"}
            ]"#,
        )
        .unwrap();

        repo.upsert(DailyUtilityRecord::new(date(3), 3.0, 0.0, 0.0, 0.0, None))
            .unwrap();

        let raw = read_raw(&repo);
        assert_eq!(raw.len(), 4);
        assert_eq!(raw[0]["date"], "2024-03-01");
        assert_eq!(raw[1]["date"], "2024-03-03");
        assert_eq!(raw[2], serde_json::json!({"date": "not a date", "gas": 1}));
        assert_eq!(raw[3], serde_json::json!({"gas": 4, "note": "kept"}));
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.file_path(), "{ this is not json").unwrap();

        assert!(repo.list().is_err());
    }

    #[test]
    fn test_cleanup_keeps_newest_duplicate() {
        let dir = tempdir().unwrap();
        let repo = FileReadingRepository::new(Some(dir.path().to_path_buf())).unwrap();

        let older = DailyUtilityRecord::new(date(1), 1.0, 0.0, 0.0, 0.0, None);
        let newer = DailyUtilityRecord::new(date(1), 2.0, 0.0, 0.0, 0.0, None)
            .with_created_at(older.created_at + Duration::hours(1));
        let other = DailyUtilityRecord::new(date(2), 5.0, 0.0, 0.0, 0.0, None);
        fs::write(
            repo.file_path(),
            serde_json::to_string(&vec![&newer, &other, &older]).unwrap(),
        )
        .unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].gas, 2.0);

        assert_eq!(repo.cleanup_duplicates().unwrap(), 1);
        assert_eq!(repo.cleanup_duplicates().unwrap(), 0);

        assert_eq!(read_raw(&repo).len(), 2);
    }
}
