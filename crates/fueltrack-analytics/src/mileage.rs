//! Mileage calculator
//!
//! Turns one vehicle's fill log into per-fill efficiency figures. Efficiency
//! is only defined between two *full* fills: the distance driven between
//! them divided by all the fuel put in after the earlier one, which includes
//! the later full fill and every partial top-up in between.
//!
//! # Examples
//!
//! ```
//! use fueltrack_analytics::mileage::compute_efficiency;
//! use fueltrack_core::types::{FillDate, FillEvent};
//!
//! let day = |d| FillDate::from_ymd(2024, 1, d).unwrap();
//! let fills = vec![
//!     FillEvent::new("f1", "car", day(1), 1000.0, 10.0),
//!     FillEvent::new("f2", "car", day(8), 1200.0, 4.0).partial(),
//!     FillEvent::new("f3", "car", day(15), 1600.0, 5.0),
//! ];
//!
//! let report = compute_efficiency(&fills);
//! // Newest first
//! assert_eq!(report.events[0].event.id.as_str(), "f3");
//! assert_eq!(report.events[0].distance_since_last_full(), Some(600.0));
//! assert!((report.average_efficiency - 600.0 / 9.0).abs() < 1e-9);
//! ```

use fueltrack_core::aggregation_types::EfficiencyReport;
use fueltrack_core::types::{EnrichedFillEvent, FillEvent, FillMetrics};
use tracing::debug;

/// Compute per-fill efficiency for a single vehicle's fills
///
/// The input may be in any order; fills are sorted chronologically (date,
/// then odometer, then id) for the calculation and returned newest first.
/// Fills that mix several vehicles should be split with
/// [`partition_by_vehicle`](crate::statistics::partition_by_vehicle) first.
///
/// A full fill gets metrics when a previous full fill exists, the odometer
/// advanced since then, and the fill itself and every partial top-up since
/// that previous full fill carry a positive volume. Everything else comes
/// back without metrics; this function never fails.
pub fn compute_efficiency(events: &[FillEvent]) -> EfficiencyReport {
    let mut sorted: Vec<FillEvent> = events.to_vec();
    sorted.sort_by(FillEvent::chronological_cmp);

    let mut enriched = Vec::with_capacity(sorted.len());
    let mut last_full_odometer: Option<f64> = None;
    let mut intervening_volume = 0.0;
    // Set when a partial since the last full fill had a non-positive volume
    let mut intervening_malformed = false;
    let mut total_efficiency = 0.0;
    let mut computed = 0usize;

    for event in sorted {
        if !event.is_full() {
            intervening_volume += event.fuel_volume;
            intervening_malformed |= !has_positive_volume(&event);
            enriched.push(EnrichedFillEvent::plain(event));
            continue;
        }

        let metrics = last_full_odometer
            .filter(|_| has_positive_volume(&event) && !intervening_malformed)
            .and_then(|previous| {
                fill_metrics(
                    event.odometer_reading - previous,
                    event.fuel_volume + intervening_volume,
                )
            });

        match metrics {
            Some(m) => {
                total_efficiency += m.efficiency;
                computed += 1;
            }
            None if last_full_odometer.is_some() => {
                debug!(
                    "No efficiency for fill {} of vehicle {}: odometer did not advance or a fuel volume was not positive",
                    event.id, event.vehicle_id
                );
            }
            None => {}
        }

        // Every full fill resets the baseline, computed or not
        last_full_odometer = Some(event.odometer_reading);
        intervening_volume = 0.0;
        intervening_malformed = false;
        enriched.push(EnrichedFillEvent { event, metrics });
    }

    enriched.reverse();

    EfficiencyReport {
        events: enriched,
        average_efficiency: if computed > 0 {
            total_efficiency / computed as f64
        } else {
            0.0
        },
    }
}

fn has_positive_volume(event: &FillEvent) -> bool {
    event.fuel_volume > 0.0
}

/// Metrics for a full fill, or None when they are not meaningful
fn fill_metrics(distance: f64, fuel_consumed: f64) -> Option<FillMetrics> {
    // Negated comparisons so NaN is rejected too
    if !(distance > 0.0) || !(fuel_consumed > 0.0) {
        return None;
    }

    let efficiency = distance / fuel_consumed;
    efficiency.is_finite().then_some(FillMetrics {
        efficiency,
        distance_since_last_full: distance,
        fuel_consumed,
    })
}
