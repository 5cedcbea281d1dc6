//! Time series for charts
//!
//! Reshapes fills into the point lists a chart wants: efficiency over time and
//! spend per calendar month.

use fueltrack_core::aggregation_types::{EfficiencyPoint, EfficiencyReport, MonthlySpend};
use fueltrack_core::types::FillEvent;
use std::collections::BTreeMap;

/// Efficiency points of every fill that has derived metrics, oldest first
pub fn efficiency_series(report: &EfficiencyReport) -> Vec<EfficiencyPoint> {
    report
        .events
        .iter()
        .rev()
        .filter_map(|enriched| {
            enriched.metrics.map(|m| EfficiencyPoint {
                date: enriched.event.filled_at,
                efficiency: m.efficiency,
                distance: m.distance_since_last_full,
                fuel_consumed: m.fuel_consumed,
            })
        })
        .collect()
}

/// Spend, fuel volume and fill count per `YYYY-MM`, oldest month first
///
/// Months without fills are not emitted. A missing total cost counts as zero.
/// Fills are summed in chronological order, so the totals do not depend on
/// input order.
pub fn monthly_spend(events: &[FillEvent]) -> Vec<MonthlySpend> {
    let mut chronological: Vec<&FillEvent> = events.iter().collect();
    chronological.sort_by(|a, b| a.chronological_cmp(b));

    let mut monthly_map: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();

    for event in chronological {
        let entry = monthly_map
            .entry(event.filled_at.format("%Y-%m"))
            .or_insert((0.0, 0.0, 0));

        entry.0 += event.cost();
        entry.1 += event.fuel_volume;
        entry.2 += 1;
    }

    monthly_map
        .into_iter()
        .map(|(month, (amount, fuel_volume, fills))| MonthlySpend {
            month,
            amount,
            fuel_volume,
            fills,
        })
        .collect()
}
