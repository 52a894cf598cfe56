use chrono::{Local, NaiveDate};

use crate::calendar::WindowDays;
use crate::error::Result;
use crate::model::reading::DailyUtilityRecord;
use crate::model::series::NormalizedSeries;
use crate::model::totals::MonthlyTotals;
use crate::repository::ReadingRepository;
use crate::service::reading_service::ReadingService;
use crate::usecase::monthly::monthly_totals;
use crate::usecase::normalize::normalize;

/// Read side of the utilities dashboard: chart series and month-over-month widgets.
///
/// "Today" is the local calendar date unless pinned with
/// [`UtilityDashboard::with_reference_date`].
pub struct UtilityDashboard<'a, R: ReadingRepository> {
    readings: &'a ReadingService<R>,
    reference_date: Option<NaiveDate>,
}

impl<'a, R: ReadingRepository> UtilityDashboard<'a, R> {
    pub fn new(readings: &'a ReadingService<R>) -> Self {
        Self {
            readings,
            reference_date: None,
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn get_utilities_series(&self, window: WindowDays) -> Result<NormalizedSeries> {
        let reference = self.reference_date();
        window.start_date(reference)?;
        let records = self.readings.list_readings()?;
        Ok(normalize(&records, window.get(), reference))
    }

    pub fn get_monthly_utilities(&self) -> Result<MonthlyTotals> {
        let records = self.readings.list_readings()?;
        Ok(monthly_totals(&records, self.reference_date()))
    }

    pub fn record_consumption(
        &self,
        date: NaiveDate,
        gas: f64,
        electricity: f64,
        water: f64,
        powder: f64,
        powder_type: Option<String>,
    ) -> Result<DailyUtilityRecord> {
        self.readings
            .record_consumption(date, gas, electricity, water, powder, powder_type)
    }
}
