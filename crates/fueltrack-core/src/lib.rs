//! Core types, errors and utilities for fueltrack
//!
//! This crate provides the fill event model, the aggregate value records the
//! analytics engine produces, error handling, fill filters and timezone
//! configuration shared by the other fueltrack crates.

pub mod aggregation_types;
pub mod error;
pub mod filters;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{FueltrackError, Result};
pub use types::{EnrichedFillEvent, FillDate, FillEvent, FillId, FillMetrics, VehicleId};
