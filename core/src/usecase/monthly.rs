use chrono::NaiveDate;

use crate::calendar::YearMonth;
use crate::model::reading::DailyUtilityRecord;
use crate::model::totals::MonthlyTotals;

/// Sums readings falling in the calendar month of `reference_date` and in the month before it.
/// Everything else is ignored. An empty input yields all-zero totals.
pub fn monthly_totals(records: &[DailyUtilityRecord], reference_date: NaiveDate) -> MonthlyTotals {
    let mut totals = MonthlyTotals::new(YearMonth::of(reference_date));

    for record in records {
        if totals.current_month.contains(record.date) {
            totals.this_month.add_record(record);
        } else if totals.previous_month.contains(record.date) {
            totals.last_month.add_record(record);
        }
    }

    tracing::debug!(
        current = %totals.current_month,
        previous = %totals.previous_month,
        "computed monthly totals"
    );
    totals
}
