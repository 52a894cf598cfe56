use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use utilboard_core::model::UtilityChange;
use utilboard_core::{DailyUtilityRecord, MonthlyTotals, NormalizedSeries};

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Gas (m³)")]
    gas: String,
    #[tabled(rename = "Electricity (kWh)")]
    electricity: String,
    #[tabled(rename = "Water (m³)")]
    water: String,
    #[tabled(rename = "Powder (kg)")]
    powder: String,
    #[tabled(rename = "Powder Type")]
    powder_type: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Utility")]
    utility: &'static str,
    #[tabled(rename = "This Month")]
    this_month: String,
    #[tabled(rename = "Last Month")]
    last_month: String,
    #[tabled(rename = "Change")]
    change: String,
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn show_readings(readings: &[DailyUtilityRecord]) {
    if readings.is_empty() {
        println!("No readings recorded.");
        return;
    }

    let rows: Vec<ReadingRow> = readings
        .iter()
        .map(|r| ReadingRow {
            date: r.date.format("%Y-%m-%d (%a)").to_string(),
            gas: format!("{:.1}", r.gas),
            electricity: format!("{:.1}", r.electricity),
            water: format!("{:.1}", r.water),
            powder: format!("{:.1}", r.powder),
            powder_type: r.powder_type.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    println!("{}", styled(Table::new(rows)));
}

pub fn show_series(series: &NormalizedSeries) {
    println!(
        "\n\x1b[1;36mLast {} days\x1b[0m ending {} ({} without readings)",
        series.window_days,
        series.reference_date.format("%Y-%m-%d"),
        series.gap_count()
    );

    let rows: Vec<ReadingRow> = series
        .iter()
        .map(|p| {
            // Gaps show as "-" rather than a misleading 0.0.
            let cell = |v: f64| if p.filled { "-".to_string() } else { format!("{:.1}", v) };
            ReadingRow {
                date: p.date.format("%Y-%m-%d (%a)").to_string(),
                gas: cell(p.gas),
                electricity: cell(p.electricity),
                water: cell(p.water),
                powder: cell(p.powder),
                powder_type: p.powder_type.clone().unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();
    println!("{}", styled(Table::new(rows)));

    let totals = series.totals();
    println!(
        "Total: gas {:.1} m³, electricity {:.1} kWh, water {:.1} m³, powder {:.1} kg",
        totals.gas, totals.electricity, totals.water, totals.powder
    );
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:+.1}%", pct),
        None => "-".to_string(),
    }
}

pub fn show_monthly(totals: &MonthlyTotals) {
    println!(
        "\n\x1b[1;36m{}\x1b[0m vs {}",
        totals.current_month, totals.previous_month
    );

    let UtilityChange {
        gas,
        electricity,
        water,
        powder,
    } = totals.change();
    let this = &totals.this_month;
    let last = &totals.last_month;

    let rows = vec![
        MonthRow {
            utility: "Gas (m³)",
            this_month: format!("{:.1}", this.gas),
            last_month: format!("{:.1}", last.gas),
            change: format_change(gas),
        },
        MonthRow {
            utility: "Electricity (kWh)",
            this_month: format!("{:.1}", this.electricity),
            last_month: format!("{:.1}", last.electricity),
            change: format_change(electricity),
        },
        MonthRow {
            utility: "Water (m³)",
            this_month: format!("{:.1}", this.water),
            last_month: format!("{:.1}", last.water),
            change: format_change(water),
        },
        MonthRow {
            utility: "Powder (kg)",
            this_month: format!("{:.1}", this.powder),
            last_month: format!("{:.1}", last.powder),
            change: format_change(powder),
        },
    ];

    println!("{}", styled(Table::new(rows)));
}
