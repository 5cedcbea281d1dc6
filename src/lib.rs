//! fueltrack - Fuel consumption analytics over fill-up logs
//!
//! This library provides functionality to:
//! - Load fill logs stored as JSON arrays or JSONL files
//! - Compute per-fill fuel efficiency with partial fills accounted for
//! - Summarize each vehicle and combine the summaries into weighted fleet figures
//! - Generate reports in table and JSON formats
//!
//! The analytics live in `fueltrack-analytics` and the shared types in
//! `fueltrack-core`; both are re-exported here under their module names.
//!
//! # Examples
//!
//! ```no_run
//! use fueltrack::{
//!     data_loader::DataLoader,
//!     filters::FillFilter,
//!     fleet::compute_fleet_statistics,
//!     statistics::compute_all_vehicle_statistics,
//!     types::FillDate,
//! };
//!
//! #[tokio::main]
//! async fn main() -> fueltrack::Result<()> {
//!     let loader = DataLoader::new("fills.jsonl")?;
//!     let fills = loader.load_filtered(FillFilter::new()).await?;
//!
//!     let now = FillDate::from_ymd(2024, 6, 30).unwrap();
//!     let vehicles = compute_all_vehicle_statistics(&fills, now, false);
//!     let fleet = compute_fleet_statistics(vehicles.iter().map(|v| &v.statistics));
//!     println!("{} vehicles, {:.2} spent", fleet.vehicle_count, fleet.total_spend);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod data_loader;
pub mod output;

pub use fueltrack_analytics::{fleet, mileage, series, statistics};
pub use fueltrack_core::{aggregation_types, error, filters, timezone, types};

// Re-export commonly used types
pub use error::{FueltrackError, Result};
pub use types::{EnrichedFillEvent, FillDate, FillEvent, FillId, FillMetrics, VehicleId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
