#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the noise complaint dashboard aggregates.
//!
//! Loads the complaint JSON document, runs one aggregation and prints the
//! result as pretty JSON on stdout so the chart widgets (or `jq`) can
//! consume it. Logging goes to stderr and is controlled by `RUST_LOG`.

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use noise_map_aggregate::{
    DashboardSnapshot, available_years, build_marker_collection, build_month_day_matrix,
    count_by_day, count_by_hour, count_by_label, count_by_weekday_hour, daily_range,
    fill_daily_range, top_n_by_day,
};
use noise_map_aggregate_models::{Aggregated, LabelField, YearFilter};
use serde::Serialize;

use crate::config::DashboardConfig;

#[derive(Parser, Debug)]
#[command(name = "noise_map", about = "Noise complaint dashboard aggregates")]
struct Cli {
    /// TOML config file (defaults to `$NOISE_MAP_CONFIG` if set)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Complaint JSON document (overrides `data_path` from the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Complaints per calendar date
    Daily {
        /// Zero-fill every date between the first and last complaint
        #[arg(long)]
        fill: bool,
    },
    /// Complaints per hour of day (0-23)
    Hourly,
    /// 12x31 month/day calendar matrix
    Matrix {
        /// Year to restrict to, or "all"
        #[arg(long)]
        year: Option<YearFilter>,
    },
    /// 7x24 weekday/hour matrix, Sunday first
    WeekdayHour {
        /// Year to restrict to, or "all"
        #[arg(long)]
        year: Option<YearFilter>,
    },
    /// Busiest dates, most complaints first
    Top {
        /// Number of dates to list
        #[arg(long)]
        n: Option<usize>,
    },
    /// Complaints per category or location label
    Labels {
        /// Which label to group by ("category" or "location")
        #[arg(long, default_value = "category")]
        field: LabelField,
    },
    /// Years present in the data
    Years,
    /// `GeoJSON` points for every complaint with coordinates
    Markers,
    /// Every dashboard aggregate at once
    Summary {
        /// Year to restrict the matrices to, or "all"
        #[arg(long)]
        year: Option<YearFilter>,
        /// Number of busiest dates to list
        #[arg(long)]
        n: Option<usize>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs the discard count, then returns the aggregate.
fn report<T>(what: &str, aggregated: Aggregated<T>) -> T {
    if aggregated.discarded > 0 {
        log::warn!(
            "{what}: skipped {} complaint(s) with a missing or malformed timestamp",
            aggregated.discarded
        );
    }
    aggregated.into_value()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = DashboardConfig::resolve(cli.config.as_deref())?;
    let data_path = config.data_path(cli.data.as_deref())?;
    let records = noise_map_source::load_complaints(data_path)?;

    match cli.command {
        Commands::Daily { fill } => {
            let daily = report("daily", count_by_day(&records));
            if fill || config.fill_range {
                let filled = daily_range(&daily)
                    .map(|(from, to)| fill_daily_range(&daily, from, to))
                    .unwrap_or_default();
                print_json(&filled)?;
            } else {
                print_json(&daily)?;
            }
        }
        Commands::Hourly => {
            print_json(&report("hourly", count_by_hour(&records)))?;
        }
        Commands::Matrix { year } => {
            let year_filter = year.unwrap_or(config.year_filter);
            log::info!("Building month/day matrix for year filter {year_filter}");
            print_json(&report(
                "matrix",
                build_month_day_matrix(&records, year_filter),
            ))?;
        }
        Commands::WeekdayHour { year } => {
            let year_filter = year.unwrap_or(config.year_filter);
            print_json(&report(
                "weekday-hour",
                count_by_weekday_hour(&records, year_filter),
            ))?;
        }
        Commands::Top { n } => {
            let n = n.unwrap_or(config.top_n);
            print_json(&report("top", top_n_by_day(&records, n)))?;
        }
        Commands::Labels { field } => {
            print_json(&report("labels", count_by_label(&records, field)))?;
        }
        Commands::Years => {
            print_json(&report("years", available_years(&records)))?;
        }
        Commands::Markers => {
            let markers = build_marker_collection(&records);
            if markers.missing_coordinates > 0 {
                log::warn!(
                    "{} complaint(s) have no coordinates and were left off the map",
                    markers.missing_coordinates
                );
            }
            print_json(&markers.features)?;
        }
        Commands::Summary { year, n } => {
            let snapshot = DashboardSnapshot::build(
                &records,
                year.unwrap_or(config.year_filter),
                n.unwrap_or(config.top_n),
            );
            if snapshot.discarded > 0 {
                log::warn!(
                    "summary: skipped {} of {} complaint(s) with a missing or malformed timestamp",
                    snapshot.discarded,
                    snapshot.total_records
                );
            }
            print_json(&snapshot)?;
        }
    }

    Ok(())
}
