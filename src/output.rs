//! Output formatting module for fueltrack
//!
//! This module provides formatters for displaying analytics results in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```no_run
//! use fueltrack::output::get_formatter;
//! use fueltrack::mileage::compute_efficiency;
//! use fueltrack::types::{FillDate, FillEvent};
//!
//! let fills = vec![
//!     FillEvent::new("f1", "car-1", FillDate::from_ymd(2024, 1, 1).unwrap(), 1000.0, 30.0),
//!     FillEvent::new("f2", "car-1", FillDate::from_ymd(2024, 1, 15).unwrap(), 1450.0, 28.0),
//! ];
//! let report = compute_efficiency(&fills);
//!
//! // Get table formatter for human-readable output
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_efficiency(&report, false));
//!
//! // Get JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true);
//! println!("{}", json_formatter.format_efficiency(&report, false));
//! ```

use crate::aggregation_types::{
    EfficiencyPoint, EfficiencyReport, FleetStatistics, MonthlySpend, VehicleSummary,
};
use crate::types::FillDate;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};

/// Trait for output formatters
///
/// This trait defines the interface for formatting the analytics results.
/// Implementations can provide different output formats (table, JSON, CSV, etc.).
pub trait OutputFormatter {
    /// Format per-fill efficiency, newest first
    ///
    /// With `computed_only`, fills without derived metrics are left out of the
    /// listing. The average always covers every computed fill.
    fn format_efficiency(&self, report: &EfficiencyReport, computed_only: bool) -> String;

    /// Format the efficiency chart series, oldest first
    fn format_efficiency_series(&self, points: &[EfficiencyPoint]) -> String;

    /// Format per-vehicle statistics with fleet totals
    fn format_statistics(&self, vehicles: &[VehicleSummary], fleet: &FleetStatistics) -> String;

    /// Format spend per calendar month
    fn format_monthly(&self, data: &[MonthlySpend]) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. Distances and volumes
/// are unit-agnostic; amounts are shown with two decimals.
pub struct TableFormatter;

impl TableFormatter {
    /// Format an amount of money
    fn format_amount(amount: f64) -> String {
        format!("{amount:.2}")
    }

    /// Format a distance or fuel quantity
    fn format_quantity(value: f64) -> String {
        format!("{value:.1}")
    }

    /// Format an efficiency or cost-per-distance ratio
    fn format_ratio(value: f64) -> String {
        format!("{value:.3}")
    }

    fn format_optional_date(date: Option<FillDate>) -> String {
        date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    }
}

impl OutputFormatter for TableFormatter {
    fn format_efficiency(&self, report: &EfficiencyReport, computed_only: bool) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Date",
            b -> "Vehicle",
            b -> "Odometer",
            b -> "Fuel",
            b -> "Cost",
            b -> "Type",
            b -> "Distance",
            b -> "Efficiency"
        ]);

        for enriched in &report.events {
            if computed_only && enriched.metrics.is_none() {
                continue;
            }

            let fill = &enriched.event;
            table.add_row(row![
                fill.filled_at,
                fill.vehicle_id,
                r -> Self::format_quantity(fill.odometer_reading),
                r -> Self::format_quantity(fill.fuel_volume),
                r -> fill.total_cost.map(Self::format_amount).unwrap_or_else(|| "-".to_string()),
                c -> if fill.is_partial { "partial" } else { "full" },
                r -> enriched
                    .distance_since_last_full()
                    .map(Self::format_quantity)
                    .unwrap_or_else(|| "-".to_string()),
                r -> enriched
                    .efficiency()
                    .map(Self::format_ratio)
                    .unwrap_or_else(|| "-".to_string())
            ]);
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 8]));

        table.add_row(row![
            b -> "AVERAGE",
            "",
            "",
            "",
            "",
            "",
            r -> format!("{} computed", report.computed_count()),
            rb -> Self::format_ratio(report.average_efficiency)
        ]);

        table.to_string()
    }

    fn format_efficiency_series(&self, points: &[EfficiencyPoint]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Date",
            b -> "Distance",
            b -> "Fuel Consumed",
            b -> "Efficiency"
        ]);

        for point in points {
            table.add_row(row![
                point.date,
                r -> Self::format_quantity(point.distance),
                r -> Self::format_quantity(point.fuel_consumed),
                r -> Self::format_ratio(point.efficiency)
            ]);
        }

        table.to_string()
    }

    fn format_statistics(&self, vehicles: &[VehicleSummary], fleet: &FleetStatistics) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Vehicle",
            b -> "Fills",
            b -> "Distance",
            b -> "Fuel",
            b -> "Efficiency",
            b -> "Spend",
            b -> "Cost/Distance",
            b -> "Last 30 Days",
            b -> "Last Fill"
        ]);

        for summary in vehicles {
            let stats = &summary.statistics;
            table.add_row(row![
                summary.vehicle_id,
                r -> stats.event_count,
                r -> Self::format_quantity(stats.total_distance),
                r -> Self::format_quantity(stats.total_fuel_volume),
                r -> Self::format_ratio(stats.average_efficiency),
                r -> Self::format_amount(stats.total_spend),
                r -> Self::format_ratio(stats.cost_per_distance_unit),
                r -> Self::format_amount(stats.last_30_days_spend),
                c -> Self::format_optional_date(stats.last_fill_date)
            ]);
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 9]));

        table.add_row(row![
            b -> format!("FLEET ({})", fleet.vehicle_count),
            rb -> fleet.event_count,
            rb -> Self::format_quantity(fleet.total_distance),
            rb -> Self::format_quantity(fleet.total_fuel_volume),
            rb -> Self::format_ratio(fleet.average_efficiency),
            rb -> Self::format_amount(fleet.total_spend),
            rb -> Self::format_ratio(fleet.cost_per_distance_unit),
            rb -> Self::format_amount(fleet.last_30_days_spend),
            cb -> Self::format_optional_date(fleet.last_fill_date)
        ]);

        table.to_string()
    }

    fn format_monthly(&self, data: &[MonthlySpend]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Month",
            b -> "Fills",
            b -> "Fuel",
            b -> "Spend"
        ]);

        for entry in data {
            table.add_row(row![
                entry.month,
                c -> entry.fills,
                r -> Self::format_quantity(entry.fuel_volume),
                r -> Self::format_amount(entry.amount)
            ]);
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 4]));

        table.add_row(row![
            b -> "TOTAL",
            cb -> data.iter().map(|m| m.fills).sum::<usize>(),
            rb -> Self::format_quantity(data.iter().map(|m| m.fuel_volume).sum()),
            rb -> Self::format_amount(data.iter().map(|m| m.amount).sum())
        ]);

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Produces structured JSON output that can be easily parsed by other tools
/// or used in automation pipelines. Fills keep their stored field names, with
/// `efficiency` and `distance_since_last_full` added when they were computed.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_efficiency(&self, report: &EfficiencyReport, computed_only: bool) -> String {
        let events: Vec<_> = report
            .events
            .iter()
            .filter(|e| !computed_only || e.metrics.is_some())
            .collect();

        Self::render(&json!({
            "events": events,
            "average_efficiency": report.average_efficiency,
            "computed_count": report.computed_count(),
        }))
    }

    fn format_efficiency_series(&self, points: &[EfficiencyPoint]) -> String {
        Self::render(&json!({ "series": points }))
    }

    fn format_statistics(&self, vehicles: &[VehicleSummary], fleet: &FleetStatistics) -> String {
        Self::render(&json!({
            "vehicles": vehicles.iter().map(|v| {
                let mut entry = json!(v.statistics);
                entry["vehicle_id"] = json!(v.vehicle_id);
                entry
            }).collect::<Vec<_>>(),
            "fleet": fleet,
        }))
    }

    fn format_monthly(&self, data: &[MonthlySpend]) -> String {
        Self::render(&json!({
            "monthly": data,
            "totals": {
                "amount": data.iter().map(|m| m.amount).sum::<f64>(),
                "fuel_volume": data.iter().map(|m| m.fuel_volume).sum::<f64>(),
                "fills": data.iter().map(|m| m.fills).sum::<usize>(),
            }
        }))
    }
}

/// Get the appropriate formatter based on the `--json` flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
