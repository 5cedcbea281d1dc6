//! Integration tests for fueltrack

mod common;

use common::{
    FillEventBuilder, assert_approx_eq, create_test_log, date, generate_vehicle_history,
};
use fueltrack::{
    aggregation_types::VehicleStatistics,
    filters::FillFilter,
    fleet::{compute_fleet_efficiency, compute_fleet_statistics},
    mileage::compute_efficiency,
    series::{efficiency_series, monthly_spend},
    statistics::{compute_all_vehicle_statistics, compute_vehicle_statistics},
    types::{FillEvent, VehicleId},
};
use futures::{StreamExt, stream};

fn fill(id: &str, day: u32, odometer: f64, volume: f64) -> FillEventBuilder {
    FillEventBuilder::new()
        .with_id(id)
        .with_date(2024, 5, day)
        .with_odometer(odometer)
        .with_volume(volume)
}

#[test]
fn test_three_full_fills() {
    let fills = vec![
        fill("a", 1, 1000.0, 10.0).build(),
        fill("b", 10, 1500.0, 5.0).build(),
        fill("c", 20, 2000.0, 6.0).build(),
    ];

    let report = compute_efficiency(&fills);
    let by_id = |id: &str| {
        report
            .events
            .iter()
            .find(|e| e.event.id.as_str() == id)
            .unwrap()
    };

    assert!(by_id("a").metrics.is_none());
    assert_eq!(by_id("b").distance_since_last_full(), Some(500.0));
    assert_eq!(by_id("b").efficiency(), Some(100.0));
    assert_eq!(by_id("c").distance_since_last_full(), Some(500.0));
    assert_approx_eq(by_id("c").efficiency().unwrap(), 83.333, 0.001);
    assert_approx_eq(report.average_efficiency, 91.667, 0.001);
}

#[test]
fn test_partial_fill_volume_counts_towards_next_full() {
    let fills = vec![
        fill("a", 1, 1000.0, 10.0).build(),
        fill("p", 5, 1200.0, 4.0).partial().build(),
        fill("b", 9, 1600.0, 5.0).build(),
    ];

    let report = compute_efficiency(&fills);
    assert_eq!(report.events[0].event.id.as_str(), "b");
    assert_eq!(report.events[0].distance_since_last_full(), Some(600.0));
    assert_approx_eq(report.events[0].efficiency().unwrap(), 66.667, 0.001);

    // The partial fill itself never gets metrics
    assert!(report.events[1].metrics.is_none());

    let series = efficiency_series(&report);
    assert_eq!(series.len(), 1);
    assert_approx_eq(series[0].fuel_consumed, 9.0, 1e-9);
}

#[test]
fn test_single_fill_history() {
    let fills = vec![fill("only", 1, 5000.0, 30.0).with_cost(45.0).build()];

    let report = compute_efficiency(&fills);
    assert_eq!(report.events.len(), 1);
    assert!(report.events[0].metrics.is_none());
    assert_eq!(report.average_efficiency, 0.0);

    let stats = compute_vehicle_statistics(&fills, date(2024, 5, 31));
    assert_eq!(stats.total_distance, 0.0);
    assert_eq!(stats.cost_per_distance_unit, 0.0);
    assert_eq!(stats.total_spend, 45.0);
    assert_eq!(stats.event_count, 1);
}

#[test]
fn test_odometer_going_backwards() {
    let fills = vec![
        fill("a", 1, 2000.0, 10.0).build(),
        fill("b", 2, 1900.0, 10.0).build(),
        fill("c", 3, 2400.0, 10.0).build(),
    ];

    let report = compute_efficiency(&fills);
    let b = report.events.iter().find(|e| e.event.id.as_str() == "b").unwrap();
    assert!(b.metrics.is_none());

    // "b" still becomes the baseline for "c"
    let c = report.events.iter().find(|e| e.event.id.as_str() == "c").unwrap();
    assert_eq!(c.distance_since_last_full(), Some(500.0));

    let stats = compute_vehicle_statistics(&fills, date(2024, 5, 31));
    assert_eq!(stats.total_distance, 400.0);
}

#[test]
fn test_trailing_window_boundaries() {
    let now = date(2024, 6, 30);
    let fills = vec![
        // 31 days before now
        fill("old", 30, 1000.0, 10.0).with_cost(11.0).build(),
        FillEventBuilder::new()
            .with_id("edge")
            .with_date(2024, 5, 31)
            .with_odometer(1100.0)
            .with_volume(10.0)
            .with_cost(13.0)
            .build(),
        FillEventBuilder::new()
            .with_id("today")
            .with_date(2024, 6, 30)
            .with_odometer(1200.0)
            .with_volume(10.0)
            .with_cost(17.0)
            .build(),
    ];

    let stats = compute_vehicle_statistics(&fills, now);
    assert_eq!(stats.last_30_days_spend, 30.0);
    assert_eq!(stats.total_spend, 41.0);
}

#[test]
fn test_fleet_pipeline() {
    let mut fills = Vec::new();
    // Vehicle A: 500 distance on 5 units
    fills.push(
        FillEventBuilder::new()
            .with_id("a1")
            .with_vehicle("a")
            .with_odometer(0.0)
            .with_volume(0.0)
            .build(),
    );
    fills.push(
        FillEventBuilder::new()
            .with_id("a2")
            .with_vehicle("a")
            .with_date(2024, 1, 5)
            .with_odometer(500.0)
            .with_volume(5.0)
            .with_cost(10.0)
            .build(),
    );
    // Vehicle B: 1000 distance on 20 units
    fills.push(
        FillEventBuilder::new()
            .with_id("b1")
            .with_vehicle("b")
            .with_odometer(0.0)
            .with_volume(0.0)
            .build(),
    );
    fills.push(
        FillEventBuilder::new()
            .with_id("b2")
            .with_vehicle("b")
            .with_date(2024, 1, 9)
            .with_odometer(1000.0)
            .with_volume(20.0)
            .with_cost(40.0)
            .build(),
    );

    let now = date(2024, 1, 31);
    let vehicles = compute_all_vehicle_statistics(&fills, now, false);
    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].vehicle_id, VehicleId::new("a"));
    assert_eq!(vehicles[0].statistics.total_fuel_volume, 5.0);

    let fleet = compute_fleet_statistics(vehicles.iter().map(|v| &v.statistics));
    assert_eq!(fleet.average_efficiency, 60.0);
    assert_eq!(fleet.total_spend, 50.0);
    assert_approx_eq(fleet.cost_per_distance_unit, 50.0 / 1500.0, 1e-12);
    assert_eq!(fleet.vehicle_count, 2);
    assert_eq!(fleet.event_count, 4);
    assert_eq!(fleet.last_fill_date, Some(date(2024, 1, 9)));

    let parallel = compute_all_vehicle_statistics(&fills, now, true);
    assert_eq!(parallel, vehicles);

    let efficiency = compute_fleet_efficiency(&fills);
    assert_eq!(efficiency.computed_count(), 2);
    assert_approx_eq(efficiency.average_efficiency, 75.0, 1e-9);
}

#[test]
fn test_empty_inputs() {
    let no_fills: Vec<FillEvent> = Vec::new();

    assert!(compute_efficiency(&no_fills).events.is_empty());
    assert_eq!(
        compute_vehicle_statistics(&no_fills, date(2024, 1, 1)),
        VehicleStatistics::default()
    );
    assert!(compute_all_vehicle_statistics(&no_fills, date(2024, 1, 1), true).is_empty());
    assert!(monthly_spend(&no_fills).is_empty());

    let fleet = compute_fleet_statistics(std::iter::empty());
    assert_eq!(fleet.vehicle_count, 0);
    assert_eq!(fleet.average_efficiency, 0.0);
}

#[tokio::test]
async fn test_vehicle_filtering() {
    let entries = vec![
        FillEventBuilder::new().with_id("1").with_vehicle("pickup").build(),
        FillEventBuilder::new().with_id("2").with_vehicle("van").build(),
        FillEventBuilder::new().with_id("3").with_vehicle("pickup").build(),
    ];

    let filter = FillFilter::new().with_vehicle(VehicleId::new("pickup"));
    let filtered: Vec<_> = filter
        .filter_stream(stream::iter(entries.into_iter().map(Ok)))
        .collect()
        .await;

    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r.as_ref().unwrap().vehicle_id.as_str() == "pickup"));
}

#[tokio::test]
async fn test_load_and_compute_from_jsonl() {
    let lines = vec![
        fill("a", 1, 1000.0, 10.0).with_cost(15.0).to_jsonl(),
        fill("p", 5, 1200.0, 4.0).partial().with_unit_price(2.0).to_jsonl(),
        "{ this line is broken".to_string(),
        fill("b", 9, 1600.0, 5.0).with_cost(8.0).to_jsonl(),
    ];
    let (_dir, loader) = create_test_log(lines).await;

    let fills = loader.load_filtered(FillFilter::new()).await.unwrap();
    assert_eq!(fills.len(), 3);

    // Pricing of the partial fill was completed on load
    let partial = fills.iter().find(|f| f.is_partial).unwrap();
    assert_eq!(partial.total_cost, Some(8.0));

    let stats = compute_vehicle_statistics(&fills, date(2024, 5, 31));
    assert_eq!(stats.total_spend, 31.0);
    assert_eq!(stats.total_distance, 600.0);
    assert_approx_eq(stats.average_efficiency, 600.0 / 9.0, 1e-9);
    assert_approx_eq(stats.cost_per_distance_unit, 31.0 / 600.0, 1e-12);
}

#[test]
fn test_generated_fleet_history() {
    // Fills every 7 days from 2024-01-01 to 2024-02-26, every third one partial
    let mut fills = generate_vehicle_history("pickup", 9, 7, 300.0, 30.0);
    fills.extend(generate_vehicle_history("scooter", 9, 7, 400.0, 10.0));

    let now = date(2024, 2, 29);
    let vehicles = compute_all_vehicle_statistics(&fills, now, true);
    assert_eq!(vehicles, compute_all_vehicle_statistics(&fills, now, false));
    assert_eq!(vehicles.len(), 2);

    let pickup = &vehicles[0].statistics;
    assert_eq!(pickup.event_count, 9);
    assert_eq!(pickup.total_distance, 2400.0);
    assert_eq!(pickup.total_fuel_volume, 270.0);
    // Partial top-ups fold into the next full fill, so every interval is 10
    assert_eq!(pickup.average_efficiency, 10.0);
    // Feb 5, 12, 19 and 26 fall in the window starting 2024-01-30
    assert_eq!(pickup.last_30_days_spend, 180.0);
    assert_eq!(pickup.last_fill_date, Some(date(2024, 2, 26)));

    let scooter = &vehicles[1].statistics;
    assert_eq!(scooter.average_efficiency, 40.0);
    assert_eq!(scooter.last_30_days_spend, 60.0);

    let fleet = compute_fleet_statistics(vehicles.iter().map(|v| &v.statistics));
    assert_approx_eq(fleet.average_efficiency, 5600.0 / 360.0, 1e-9);

    let months = monthly_spend(&fills);
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].fills + months[1].fills, 18);
}
