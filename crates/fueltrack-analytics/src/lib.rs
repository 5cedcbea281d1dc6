//! Fuel consumption analytics engine for fueltrack
//!
//! Every function in this crate is a pure, synchronous computation over the
//! fills it is given: no I/O, no clock, no shared state. The pipeline is
//!
//! 1. [`mileage::compute_efficiency`]: per-fill efficiency for one vehicle
//! 2. [`statistics::compute_vehicle_statistics`]: one vehicle's summary
//! 3. [`fleet::compute_fleet_statistics`]: summaries combined across vehicles

pub mod fleet;
pub mod mileage;
pub mod series;
pub mod statistics;

pub use fleet::{compute_fleet_efficiency, compute_fleet_statistics};
pub use mileage::compute_efficiency;
pub use series::{efficiency_series, monthly_spend};
pub use statistics::{
    TRAILING_SPEND_WINDOW_DAYS, compute_all_vehicle_statistics, compute_vehicle_statistics,
    partition_by_vehicle,
};
