pub mod calendar;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use calendar::{parse_reference_date, WindowDays, YearMonth};
pub use config::AppConfig;
pub use error::UtilityError;
pub use model::{DailyUtilityRecord, MonthlyTotals, NormalizedSeries, SeriesPoint, UtilityTotals};
pub use repository::{FileReadingRepository, InMemoryReadingRepository, ReadingRepository};
pub use service::reading_service::ReadingService;
pub use usecase::{monthly_totals, normalize, UtilityDashboard};
