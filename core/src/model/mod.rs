pub mod reading;
pub mod series;
pub mod totals;

pub use reading::DailyUtilityRecord;
pub use series::{DailyReading, NormalizedSeries, SeriesPoint};
pub use totals::{MonthlyTotals, UtilityChange, UtilityTotals};
