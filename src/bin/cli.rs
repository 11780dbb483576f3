//! Precip CLI - Command-line interface for precipitation statistics

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use precip::climatology::{
    average_annual_precip_days, estimate_precip_probability, station_coverage,
};
use precip::data::ObservationSet;
use precip::stations::{station_by_code, STATION_REGISTRY};

/// Default observation CSV (relative to the working directory)
const DEFAULT_DATA_FILE: &str = "noaa_historical_weather_10yr.csv";

#[derive(Parser)]
#[command(name = "precip")]
#[command(author, version, about = "Historical precipitation statistics CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the NOAA daily-summaries CSV
    #[arg(long, env = "PRECIP_DATA", default_value = DEFAULT_DATA_FILE, global = true)]
    data: PathBuf,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Average precipitation days per year for a station
    Days {
        /// Station code (bos, jnu, mia)
        station: String,
    },

    /// Chance of precipitation at a station on a calendar day
    Chance {
        /// Station code (bos, jnu, mia)
        station: String,

        /// Month of the year (1-12)
        month: u32,

        /// Day of the month (1-31)
        day: u32,

        /// Headline the exact k/n estimate instead of the grid result
        #[arg(long)]
        exact: bool,
    },

    /// List registered stations and their data coverage
    Stations,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if !cli.json {
        println!("{}", "Precip CLI v0.1.0".cyan().bold());
        println!();
    }

    match cli.command {
        Commands::Days { station } => run_days(&cli.data, &station, cli.json),
        Commands::Chance {
            station,
            month,
            day,
            exact,
        } => run_chance(&cli.data, &station, month, day, exact, cli.json),
        Commands::Stations => run_stations(&cli.data, cli.json),
    }
}

fn run_days(data: &Path, station: &str, json: bool) -> Result<()> {
    if !json {
        println!(
            "{}: {}",
            "Average precipitation days".green(),
            station_label(station)
        );
        println!();
    }

    let set = load_observations(data)?;

    let result = match average_annual_precip_days(&set, station) {
        Some(result) => result,
        None => {
            return report_no_data(json, &format!("No observations for station '{}'.", station))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", "Wet days by year:".yellow().bold());
    println!("{:>6} {:>9}", "Year", "Wet days");
    println!("{}", "-".repeat(16));
    for year in &result.years {
        println!("{:>6} {:>9}", year.year, year.wet_days);
    }
    println!();
    println!(
        "{} {:.1} wet days per year over {} years",
        "Average:".green().bold(),
        result.mean_days,
        result.years.len()
    );

    Ok(())
}

fn run_chance(
    data: &Path,
    station: &str,
    month: u32,
    day: u32,
    exact: bool,
    json: bool,
) -> Result<()> {
    if !json {
        println!(
            "{}: {} on {:02}-{:02}",
            "Chance of precipitation".green(),
            station_label(station),
            month,
            day
        );
        println!();
    }

    let set = load_observations(data)?;

    let est = match estimate_precip_probability(&set, station, month, day) {
        Some(est) => est,
        None => {
            return report_no_data(
                json,
                &format!(
                    "No observations for '{}' on {:02}-{:02}.",
                    station, month, day
                ),
            )
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&est)?);
        return Ok(());
    }

    println!(
        "Precipitation observed in {} of {} years",
        est.successes, est.trials
    );

    let headline = if exact { est.analytic } else { est.probability };
    println!(
        "{} {:.1}%",
        "Chance of precipitation:".green().bold(),
        headline * 100.0
    );
    println!(
        "{}",
        format!(
            "(grid estimate {:.2}, exact {:.4}, log-likelihood {:.4})",
            est.probability, est.analytic, est.log_likelihood
        )
        .dimmed()
    );

    Ok(())
}

fn run_stations(data: &Path, json: bool) -> Result<()> {
    if !json {
        println!("{}", "Registered stations".green());
        println!();
    }

    let set = load_observations(data)?;
    let coverage = station_coverage(&set);

    if json {
        println!("{}", serde_json::to_string_pretty(&coverage)?);
        return Ok(());
    }

    println!(
        "{:>5} {:<36} {:>6} {:>10} {:>9} {:>10} {:>10}",
        "Code", "Station", "Rows", "Years", "Wet days", "Rain days", "Snow days"
    );
    println!("{}", "-".repeat(92));

    for c in &coverage {
        let span = match (c.first_year, c.last_year) {
            (Some(first), Some(last)) => format!("{}-{}", first, last),
            _ => "-".to_string(),
        };
        println!(
            "{:>5} {:<36} {:>6} {:>10} {:>9} {:>10} {:>10}",
            c.station, c.name, c.rows, span, c.wet_days, c.rain_days, c.snow_days
        );
    }

    println!();
    for station in STATION_REGISTRY {
        println!("{}", format!("{}: {}", station.code, station.description).dimmed());
    }

    Ok(())
}

/// Load the observation set with a loading spinner
fn load_observations(data: &Path) -> Result<ObservationSet> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading observations...");

    let set = ObservationSet::load(data)
        .with_context(|| format!("Failed to load CSV from {:?}", data))?;

    pb.finish_and_clear();

    Ok(set)
}

/// Report a query that matched no observations. Exit code stays 0; an
/// empty result is an answer, not a failure.
fn report_no_data(json: bool, message: &str) -> Result<()> {
    if json {
        println!("null");
    } else {
        println!("{}", message.yellow());
    }
    Ok(())
}

/// Station code to display label, falling back to the raw code
fn station_label(code: &str) -> String {
    match station_by_code(code) {
        Some(station) => format!("{} ({})", station.name, station.code),
        None => code.to_string(),
    }
}
