mod observability;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use utilboard_core::{
    parse_reference_date, AppConfig, FileReadingRepository, ReadingService, UtilityDashboard,
    WindowDays,
};

#[derive(Parser)]
#[command(name = "utilboard")]
#[command(about = "Daily utility consumption tracker for the shop floor", long_about = None)]
struct Cli {
    /// Directory holding readings.json (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Never write sample data into an empty store
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record (or overwrite) one day's consumption
    Record {
        /// Date of the reading: YYYY-MM-DD, today, yesterday or -Nd
        #[arg(long, default_value = "today")]
        date: String,
        #[arg(long)]
        gas: f64,
        #[arg(long)]
        electricity: f64,
        #[arg(long)]
        water: f64,
        #[arg(long, default_value_t = 0.0)]
        powder: f64,
        #[arg(long)]
        powder_type: Option<String>,
    },
    /// List every stored reading
    List,
    /// Show a gap-filled series for the last N days (7d, 30d, ...)
    Series {
        #[arg(long)]
        window: Option<String>,
        /// Treat this date as today
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Compare this month's totals with last month's
    Monthly {
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Write a week of sample readings if the store is empty
    Seed {
        #[arg(long)]
        today: Option<String>,
    },
    /// Collapse duplicate readings for the same date, keeping the newest
    Cleanup,
}

fn resolve_today(input: Option<&str>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input {
        Some(s) => Ok(parse_reference_date(s, today)?),
        None => Ok(today),
    }
}

fn main() -> Result<()> {
    observability::init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let data_dir = cli.data_dir.clone().or_else(|| config.data_dir.clone());
    let repo = FileReadingRepository::new(data_dir)?;
    let service = ReadingService::new(repo);
    let seed = config.seed_sample_data && !cli.no_seed;
    tracing::debug!(
        store = %service.repository().file_path().display(),
        seed,
        "opened reading store"
    );

    match cli.command {
        Commands::Record {
            date,
            gas,
            electricity,
            water,
            powder,
            powder_type,
        } => {
            let date = resolve_today(Some(date.as_str()))?;
            let stored =
                service.record_consumption(date, gas, electricity, water, powder, powder_type)?;
            println!("Reading saved for {} (ID: {})", stored.date, stored.id);
        }
        Commands::List => {
            let readings = service.list_readings()?;
            report::show_readings(&readings);
        }
        Commands::Series { window, today, json } => {
            let window = match window {
                Some(w) => w.parse::<WindowDays>()?,
                None => config.default_window()?,
            };
            let today = resolve_today(today.as_deref())?;
            if seed {
                service.seed_if_empty(today)?;
            }

            let dashboard = UtilityDashboard::new(&service).with_reference_date(today);
            let series = dashboard.get_utilities_series(window)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                report::show_series(&series);
            }
        }
        Commands::Monthly { today, json } => {
            let today = resolve_today(today.as_deref())?;
            if seed {
                service.seed_if_empty(today)?;
            }

            let dashboard = UtilityDashboard::new(&service).with_reference_date(today);
            let totals = dashboard.get_monthly_utilities()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else {
                report::show_monthly(&totals);
            }
        }
        Commands::Seed { today } => {
            let today = resolve_today(today.as_deref())?;
            let written = service.seed_if_empty(today)?;
            if written == 0 {
                println!("Store already has readings; nothing seeded.");
            } else {
                println!("Seeded {} sample readings ending {}.", written, today);
            }
        }
        Commands::Cleanup => {
            let removed = service.repository().cleanup_duplicates()?;
            println!("Removed {} duplicate readings.", removed);
        }
    }
    Ok(())
}
