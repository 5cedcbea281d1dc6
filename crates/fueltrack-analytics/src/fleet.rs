//! Fleet aggregation
//!
//! Combines per-vehicle results into fleet-wide figures. Ratios are always
//! recomputed from summed numerators and denominators instead of averaging the
//! per-vehicle ratios, so a vehicle that is barely used cannot skew the fleet
//! figure.

use crate::mileage::compute_efficiency;
use crate::statistics::partition_by_vehicle;
use fueltrack_core::aggregation_types::{EfficiencyReport, FleetStatistics, VehicleStatistics};
use fueltrack_core::types::FillEvent;
use tracing::debug;

/// Combine already-computed vehicle statistics into fleet statistics
///
/// Accepts anything that yields `&VehicleStatistics`, so both a plain slice
/// and `summaries.iter().map(|s| &s.statistics)` work. An empty input gives
/// all-zero statistics.
///
/// # Examples
///
/// ```
/// use fueltrack_analytics::fleet::compute_fleet_statistics;
/// use fueltrack_core::aggregation_types::VehicleStatistics;
///
/// let a = VehicleStatistics { total_distance: 500.0, total_fuel_volume: 5.0, ..Default::default() };
/// let b = VehicleStatistics { total_distance: 1000.0, total_fuel_volume: 20.0, ..Default::default() };
///
/// let fleet = compute_fleet_statistics(&[a, b]);
/// assert_eq!(fleet.average_efficiency, 60.0);
/// ```
pub fn compute_fleet_statistics<'a, I>(per_vehicle: I) -> FleetStatistics
where
    I: IntoIterator<Item = &'a VehicleStatistics>,
{
    let mut fleet = FleetStatistics::default();

    for stats in per_vehicle {
        fleet.total_spend += stats.total_spend;
        fleet.total_fuel_volume += stats.total_fuel_volume;
        fleet.total_distance += stats.total_distance;
        fleet.last_30_days_spend += stats.last_30_days_spend;
        fleet.event_count += stats.event_count;
        fleet.vehicle_count += 1;
        fleet.last_fill_date = fleet.last_fill_date.max(stats.last_fill_date);
    }

    fleet.average_efficiency = if fleet.total_fuel_volume > 0.0 {
        fleet.total_distance / fleet.total_fuel_volume
    } else {
        0.0
    };
    fleet.cost_per_distance_unit = if fleet.total_distance > 0.0 {
        fleet.total_spend / fleet.total_distance
    } else {
        0.0
    };

    fleet
}

/// Efficiency listing across every vehicle in a mixed fill log
///
/// Each vehicle's fills go through the mileage calculator on their own; the
/// enriched fills are then merged newest first. Same-day fills of different
/// vehicles are ordered by the chronological key and then by vehicle id, so
/// the listing does not depend on input order. The average is the plain mean
/// of every efficiency value computed across the fleet.
pub fn compute_fleet_efficiency(events: &[FillEvent]) -> EfficiencyReport {
    let partitions = partition_by_vehicle(events);
    debug!("Computing efficiency for {} vehicles", partitions.len());

    let mut merged = Vec::with_capacity(events.len());
    for fills in partitions.values() {
        merged.extend(compute_efficiency(fills).events);
    }

    merged.sort_by(|a, b| {
        b.event
            .chronological_cmp(&a.event)
            .then_with(|| b.event.vehicle_id.cmp(&a.event.vehicle_id))
    });

    let efficiencies: Vec<f64> = merged.iter().filter_map(|e| e.efficiency()).collect();
    let average_efficiency = if efficiencies.is_empty() {
        0.0
    } else {
        efficiencies.iter().sum::<f64>() / efficiencies.len() as f64
    };

    EfficiencyReport {
        events: merged,
        average_efficiency,
    }
}
