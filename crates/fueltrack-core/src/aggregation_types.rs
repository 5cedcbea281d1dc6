//! Aggregation data types for fueltrack
//!
//! Pure value records produced by the analytics engine. They are recomputed
//! from fill events on every request and carry no identity of their own.

use crate::types::{EnrichedFillEvent, FillDate, VehicleId};
use serde::{Deserialize, Serialize};

/// Enriched fills of one vehicle (or a whole fleet) plus their mean efficiency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyReport {
    /// Fills in descending chronological order
    pub events: Vec<EnrichedFillEvent>,
    /// Mean of every computed efficiency value, 0 when none could be computed
    pub average_efficiency: f64,
}

impl EfficiencyReport {
    /// Number of fills that carry derived metrics
    pub fn computed_count(&self) -> usize {
        self.events.iter().filter(|e| e.metrics.is_some()).count()
    }
}

/// Summary statistics of a single vehicle
///
/// An empty history yields all-zero figures and no last fill date. Callers
/// that need to tell "no data" apart from a real zero should look at
/// `event_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleStatistics {
    /// Sum of total cost over all fills
    pub total_spend: f64,
    /// Sum of fuel volume over all fills
    pub total_fuel_volume: f64,
    /// Odometer delta between the chronologically first and last fill
    pub total_distance: f64,
    /// Mean per-fill efficiency
    pub average_efficiency: f64,
    /// Spend per distance unit, 0 when no distance was covered
    pub cost_per_distance_unit: f64,
    /// Spend within the trailing window ending at the reference date
    pub last_30_days_spend: f64,
    /// Date of the most recent fill
    pub last_fill_date: Option<FillDate>,
    /// Number of fills
    pub event_count: usize,
}

/// Statistics of one vehicle, labelled with the vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub vehicle_id: VehicleId,
    pub statistics: VehicleStatistics,
}

/// Statistics combined across a set of vehicles
///
/// Totals are plain sums. `average_efficiency` and `cost_per_distance_unit`
/// are ratios of the summed figures, so vehicles weigh in proportionally to
/// the fuel they burned and the distance they covered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetStatistics {
    pub total_spend: f64,
    pub total_fuel_volume: f64,
    pub total_distance: f64,
    /// Fleet distance over fleet fuel volume
    pub average_efficiency: f64,
    /// Fleet spend over fleet distance
    pub cost_per_distance_unit: f64,
    pub last_30_days_spend: f64,
    /// Most recent fill across all vehicles
    pub last_fill_date: Option<FillDate>,
    /// Number of fills across all vehicles
    pub event_count: usize,
    /// Number of vehicles combined
    pub vehicle_count: usize,
}

/// One point of an efficiency chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPoint {
    pub date: FillDate,
    pub efficiency: f64,
    pub distance: f64,
    /// Fuel burned over `distance`, partial top-ups included
    pub fuel_consumed: f64,
}

/// Spend rolled up by calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpend {
    /// Year and month in YYYY-MM format
    pub month: String,
    /// Sum of total cost in the month
    pub amount: f64,
    /// Sum of fuel volume in the month
    pub fuel_volume: f64,
    /// Number of fills in the month
    pub fills: usize,
}
