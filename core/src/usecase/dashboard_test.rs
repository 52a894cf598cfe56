#[cfg(test)]
mod tests {
    use crate::calendar::WindowDays;
    use crate::error::UtilityError;
    use crate::model::reading::DailyUtilityRecord;
    use crate::repository::{InMemoryReadingRepository, ReadingRepository};
    use crate::service::reading_service::ReadingService;
    use crate::usecase::dashboard::UtilityDashboard;
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    struct MockReadingRepo {
        readings: Vec<DailyUtilityRecord>,
    }

    impl ReadingRepository for MockReadingRepo {
        fn list(&self) -> Result<Vec<DailyUtilityRecord>> {
            Ok(self.readings.clone())
        }

        fn upsert(&self, _record: DailyUtilityRecord) -> Result<DailyUtilityRecord> {
            unimplemented!()
        }
    }

    struct UnavailableRepo;

    impl ReadingRepository for UnavailableRepo {
        fn list(&self) -> Result<Vec<DailyUtilityRecord>> {
            Err(anyhow!("connection refused"))
        }

        fn upsert(&self, _record: DailyUtilityRecord) -> Result<DailyUtilityRecord> {
            Err(anyhow!("connection refused"))
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_series_from_sparse_readings() {
        let repo = MockReadingRepo {
            readings: vec![
                DailyUtilityRecord::new(d("2024-03-03"), 20.0, 0.0, 0.0, 0.0, None),
                DailyUtilityRecord::new(d("2024-03-01"), 10.0, 0.0, 0.0, 0.0, None),
            ],
        };
        let service = ReadingService::new(repo);
        let dashboard = UtilityDashboard::new(&service).with_reference_date(d("2024-03-07"));

        let series = dashboard.get_utilities_series(WindowDays::WEEK).unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series.reference_date, d("2024-03-07"));
        assert_eq!(series.points[0].gas, 10.0);
        assert_eq!(series.points[2].gas, 20.0);
        assert_eq!(series.totals().gas, 30.0);

        let month = dashboard.get_utilities_series(WindowDays::MONTH).unwrap();
        assert_eq!(month.len(), 30);
        assert_eq!(month.totals().gas, 30.0);
    }

    #[test]
    fn test_empty_store_is_not_an_error() {
        let service = ReadingService::new(InMemoryReadingRepository::new());
        let dashboard = UtilityDashboard::new(&service).with_reference_date(d("2024-01-15"));

        let series = dashboard.get_utilities_series(WindowDays::WEEK).unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series.gap_count(), 7);

        let monthly = dashboard.get_monthly_utilities().unwrap();
        assert!(monthly.this_month.is_zero());
        assert!(monthly.last_month.is_zero());
        assert_eq!(monthly.previous_month.year, 2023);
        assert_eq!(monthly.previous_month.month, 12);
    }

    #[test]
    fn test_unavailable_store_propagates() {
        let service = ReadingService::new(UnavailableRepo);
        let dashboard = UtilityDashboard::new(&service).with_reference_date(d("2024-03-07"));

        let err = dashboard.get_utilities_series(WindowDays::WEEK).unwrap_err();
        assert!(err.is_store_unavailable());

        let err = dashboard.get_monthly_utilities().unwrap_err();
        assert!(matches!(err, UtilityError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_recorded_consumption_shows_up_in_queries() {
        let service = ReadingService::new(InMemoryReadingRepository::new());
        let dashboard = UtilityDashboard::new(&service).with_reference_date(d("2024-03-07"));
        let powder = || Some("Matte Black TGIC".to_string());

        dashboard
            .record_consumption(d("2024-03-06"), 250.0, 1800.0, 90.0, 10.0, powder())
            .unwrap();
        dashboard
            .record_consumption(d("2024-02-20"), 200.0, 1500.0, 80.0, 5.0, None)
            .unwrap();
        dashboard
            .record_consumption(d("2024-03-06"), 260.0, 1850.0, 95.0, 12.0, powder())
            .unwrap();

        let series = dashboard.get_utilities_series(WindowDays::WEEK).unwrap();
        let point = &series.points[5];
        assert_eq!(point.date, d("2024-03-06"));
        assert_eq!(point.gas, 260.0);
        assert_eq!(point.powder_type.as_deref(), Some("Matte Black TGIC"));
        assert!(!point.filled);

        let monthly = dashboard.get_monthly_utilities().unwrap();
        assert_eq!(monthly.this_month.electricity, 1850.0);
        assert_eq!(monthly.last_month.electricity, 1500.0);
        assert_eq!(monthly.change().gas, Some(30.0));
    }

    #[test]
    fn test_invalid_window_rejected() {
        let err = "0".parse::<WindowDays>().unwrap_err();
        assert!(matches!(err, UtilityError::InvalidWindow(_)));
        assert!(WindowDays::new(-30).is_err());
    }

    #[test]
    fn test_window_past_earliest_date_rejected_before_reading() {
        let service = ReadingService::new(UnavailableRepo);
        let dashboard = UtilityDashboard::new(&service).with_reference_date(NaiveDate::MIN);
        let window = WindowDays::new(10).unwrap();

        let err = dashboard.get_utilities_series(window).unwrap_err();
        assert!(matches!(err, UtilityError::InvalidWindow(_)));
    }

    #[test]
    fn test_window_at_earliest_date_keeps_full_length() {
        let service = ReadingService::new(InMemoryReadingRepository::new());
        let reference = NaiveDate::MIN + chrono::Days::new(9);
        let dashboard = UtilityDashboard::new(&service).with_reference_date(reference);

        let series = dashboard.get_utilities_series(WindowDays::new(10).unwrap()).unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series.points[0].date, NaiveDate::MIN);
    }
}
