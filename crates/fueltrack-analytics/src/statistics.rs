//! Per-vehicle statistics
//!
//! Rolls one vehicle's fill log up into spend, fuel and distance totals, the
//! mean efficiency from the [mileage calculator](crate::mileage) and the spend
//! of the trailing 30-day window.

use crate::mileage::compute_efficiency;
use fueltrack_core::aggregation_types::{VehicleStatistics, VehicleSummary};
use fueltrack_core::types::{FillDate, FillEvent, VehicleId};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Length of the trailing spend window in days
///
/// The window is `[now - 30 days, now]`, inclusive at both ends: a fill dated
/// exactly 30 days before the reference date counts, one dated 31 days before
/// does not, and fills dated after the reference date are left out.
pub const TRAILING_SPEND_WINDOW_DAYS: u64 = 30;

/// Whether `date` falls inside the trailing spend window ending at `now`
pub fn in_trailing_window(date: FillDate, now: FillDate) -> bool {
    date >= now.days_before(TRAILING_SPEND_WINDOW_DAYS) && date <= now
}

/// Compute summary statistics for a single vehicle's fills
///
/// `now` is the reference date of the trailing spend window; it is never
/// read from the clock here. An empty slice yields all-zero statistics with
/// no last fill date.
///
/// # Examples
///
/// ```
/// use fueltrack_analytics::statistics::compute_vehicle_statistics;
/// use fueltrack_core::types::{FillDate, FillEvent};
///
/// let day = |d| FillDate::from_ymd(2024, 5, d).unwrap();
/// let fills = vec![
///     FillEvent::new("a", "car", day(1), 10_000.0, 40.0).with_total_cost(60.0),
///     FillEvent::new("b", "car", day(20), 10_600.0, 40.0).with_total_cost(64.0),
/// ];
///
/// let stats = compute_vehicle_statistics(&fills, day(31));
/// assert_eq!(stats.total_spend, 124.0);
/// assert_eq!(stats.total_distance, 600.0);
/// assert_eq!(stats.average_efficiency, 15.0);
/// assert_eq!(stats.last_fill_date, Some(day(20)));
/// ```
pub fn compute_vehicle_statistics(events: &[FillEvent], now: FillDate) -> VehicleStatistics {
    if events.is_empty() {
        return VehicleStatistics::default();
    }

    // Summed in chronological order so any permutation gives identical totals
    let mut chronological: Vec<&FillEvent> = events.iter().collect();
    chronological.sort_by(|a, b| a.chronological_cmp(b));

    let total_spend: f64 = chronological.iter().map(|e| e.cost()).sum();
    let total_fuel_volume: f64 = chronological.iter().map(|e| e.fuel_volume).sum();

    let (first, last) = (chronological[0], chronological[chronological.len() - 1]);
    let total_distance = if chronological.len() > 1 {
        last.odometer_reading - first.odometer_reading
    } else {
        0.0
    };

    let average_efficiency = compute_efficiency(events).average_efficiency;

    let cost_per_distance_unit = if total_distance > 0.0 {
        total_spend / total_distance
    } else {
        0.0
    };

    let last_30_days_spend = chronological
        .iter()
        .filter(|e| in_trailing_window(e.filled_at, now))
        .map(|e| e.cost())
        .sum();

    VehicleStatistics {
        total_spend,
        total_fuel_volume,
        total_distance,
        average_efficiency,
        cost_per_distance_unit,
        last_30_days_spend,
        last_fill_date: Some(last.filled_at),
        event_count: events.len(),
    }
}

/// Split a mixed fill log into per-vehicle logs, keyed and ordered by vehicle id
pub fn partition_by_vehicle(events: &[FillEvent]) -> BTreeMap<VehicleId, Vec<FillEvent>> {
    let mut partitions: BTreeMap<VehicleId, Vec<FillEvent>> = BTreeMap::new();
    for event in events {
        partitions
            .entry(event.vehicle_id.clone())
            .or_default()
            .push(event.clone());
    }
    partitions
}

/// Partition a mixed fill log by vehicle and compute statistics for each
///
/// With `parallel` set, vehicles are processed on the rayon thread pool. The
/// result is ordered by vehicle id either way.
pub fn compute_all_vehicle_statistics(
    events: &[FillEvent],
    now: FillDate,
    parallel: bool,
) -> Vec<VehicleSummary> {
    let partitions: Vec<(VehicleId, Vec<FillEvent>)> =
        partition_by_vehicle(events).into_iter().collect();
    debug!(
        "Computing statistics for {} vehicles ({} fills)",
        partitions.len(),
        events.len()
    );

    let summarize = |(vehicle_id, fills): (VehicleId, Vec<FillEvent>)| VehicleSummary {
        statistics: compute_vehicle_statistics(&fills, now),
        vehicle_id,
    };

    if parallel {
        partitions.into_par_iter().map(summarize).collect()
    } else {
        partitions.into_iter().map(summarize).collect()
    }
}
