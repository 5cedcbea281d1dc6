//! CLI interface for fueltrack
//!
//! This module defines the command-line interface using clap.
//!
//! # Example
//!
//! ```bash
//! # Per-vehicle statistics plus fleet totals
//! fueltrack --file fills.jsonl stats
//!
//! # Per-fill efficiency of a single vehicle, as JSON
//! fueltrack --file fills.jsonl --vehicle car-1 --json efficiency
//!
//! # Monthly spend for the first half of 2024, log path taken from the environment
//! FUELTRACK_DATA=fills.json fueltrack --since 2024-01 --until 2024-06-30 monthly
//! ```

use crate::data_loader::DATA_PATH_ENV;
use crate::error::{FueltrackError, Result};
use crate::filters::FillFilter;
use crate::types::{FillDate, VehicleId};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Analyze fuel fill-up logs
#[derive(Parser, Debug, Clone)]
#[command(name = "fueltrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fill log to read (.jsonl for one fill per line, otherwise a JSON array)
    #[arg(long, short = 'f', env = DATA_PATH_ENV, global = true)]
    pub file: Option<PathBuf>,

    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Filter by start date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Filter by end date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Only include fills of this vehicle
    #[arg(long, global = true)]
    pub vehicle: Option<String>,

    /// Reference date for the trailing 30-day spend (defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Timezone used to work out today's date (e.g. "Europe/Berlin", "Asia/Kolkata")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC to work out today's date (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Compute vehicle statistics in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Subcommand to execute (defaults to `stats`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Arguments for the efficiency report
#[derive(Args, Debug, Clone, Default)]
pub struct EfficiencyArgs {
    /// Show only fills with a computed efficiency
    #[arg(long)]
    pub computed_only: bool,

    /// Print the efficiency chart series instead of the fill listing
    #[arg(long)]
    pub series: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show per-fill efficiency
    Efficiency(EfficiencyArgs),
    /// Show per-vehicle statistics and fleet totals
    Stats,
    /// Show spend per calendar month
    Monthly,
}

impl Cli {
    /// Build the fill filter from the global filter options
    pub fn fill_filter(&self) -> Result<FillFilter> {
        let mut filter = FillFilter::new();

        let since = self.since.as_deref().map(parse_date_filter).transpose()?;
        let until = self.until.as_deref().map(parse_date_filter).transpose()?;

        if let (Some(since), Some(until)) = (since, until)
            && since > until
        {
            return Err(FueltrackError::InvalidArgument(format!(
                "--since {since} is after --until {until}"
            )));
        }

        if let Some(since) = since {
            filter = filter.with_since(since);
        }
        if let Some(until) = until {
            filter = filter.with_until(until);
        }
        if let Some(vehicle) = &self.vehicle {
            filter = filter.with_vehicle(VehicleId::new(vehicle.as_str()));
        }

        Ok(filter)
    }

    /// Path of the fill log, which must be given by flag or environment
    pub fn data_path(&self) -> Result<PathBuf> {
        self.file.clone().ok_or_else(|| {
            FueltrackError::Config(format!(
                "no fill log given; pass --file or set {DATA_PATH_ENV}"
            ))
        })
    }
}

/// Parse date filter from string (YYYY-MM-DD or YYYY-MM format)
///
/// A bare month resolves to its first day.
pub fn parse_date_filter(date_str: &str) -> Result<FillDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(FillDate::new(date));
    }

    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| FueltrackError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| FueltrackError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(FueltrackError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        FillDate::from_ymd(year, month, 1)
            .ok_or_else(|| FueltrackError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(FueltrackError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )))
    }
}
