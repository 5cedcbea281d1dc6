//! Common test utilities and helpers for fueltrack tests
//!
//! This module provides reusable test utilities, mock data generators,
//! and helper functions to make testing easier and more consistent.

use fueltrack::{
    data_loader::DataLoader,
    types::{FillDate, FillEvent},
};
use tempfile::TempDir;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Common test vehicles
pub const TEST_VEHICLES: &[&str] = &["hatchback", "pickup", "van", "scooter"];

/// Builder for creating test FillEvent instances
pub struct FillEventBuilder {
    id: String,
    vehicle_id: String,
    filled_at: FillDate,
    odometer_reading: f64,
    fuel_volume: f64,
    unit_price: Option<f64>,
    total_cost: Option<f64>,
    is_partial: bool,
}

impl FillEventBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            id: "fill-1".to_string(),
            vehicle_id: TEST_VEHICLES[0].to_string(),
            filled_at: date(2024, 1, 1),
            odometer_reading: 10_000.0,
            fuel_volume: 40.0,
            unit_price: None,
            total_cost: None,
            is_partial: false,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_vehicle(mut self, vehicle: &str) -> Self {
        self.vehicle_id = vehicle.to_string();
        self
    }

    pub fn with_date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.filled_at = date(year, month, day);
        self
    }

    pub fn with_odometer(mut self, odometer: f64) -> Self {
        self.odometer_reading = odometer;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.fuel_volume = volume;
        self
    }

    pub fn with_unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.total_cost = Some(cost);
        self
    }

    pub fn partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    pub fn build(self) -> FillEvent {
        let mut event = FillEvent::new(
            self.id,
            self.vehicle_id,
            self.filled_at,
            self.odometer_reading,
            self.fuel_volume,
        );
        event.unit_price = self.unit_price;
        event.total_cost = self.total_cost;
        event.is_partial = self.is_partial;
        event
    }

    /// Serialize the fill as one JSONL line
    #[allow(clippy::wrong_self_convention)]
    pub fn to_jsonl(self) -> String {
        serde_json::to_string(&self.build()).unwrap()
    }
}

impl Default for FillEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn date(year: i32, month: u32, day: u32) -> FillDate {
    FillDate::from_ymd(year, month, day).unwrap()
}

/// Write the given JSONL lines to a fresh fill log and open a loader on it
pub async fn create_test_log(lines: Vec<String>) -> (TempDir, DataLoader) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fills.jsonl");

    let mut file = fs::File::create(&path).await.unwrap();
    for line in lines {
        file.write_all(line.as_bytes()).await.unwrap();
        file.write_all(b"\n").await.unwrap();
    }
    file.flush().await.unwrap();

    let loader = DataLoader::new(&path).unwrap();
    (temp_dir, loader)
}

/// A regular driving pattern for one vehicle: a fill every `days_between`
/// days, `distance` covered and `volume` fuel bought each time, with every
/// third fill partial.
pub fn generate_vehicle_history(
    vehicle: &str,
    fills: usize,
    days_between: u32,
    distance: f64,
    volume: f64,
) -> Vec<FillEvent> {
    let start = date(2024, 1, 1);
    (0..fills)
        .map(|i| {
            let filled_at = FillDate::new(
                *start.inner() + chrono::Days::new(u64::from(days_between) * i as u64),
            );
            let mut event = FillEvent::new(
                format!("{vehicle}-{i}"),
                vehicle,
                filled_at,
                10_000.0 + distance * i as f64,
                volume,
            )
            .with_unit_price(1.5)
            .with_completed_pricing();
            event.is_partial = i % 3 == 2;
            event
        })
        .collect()
}

/// Assert two floats are within tolerance
pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() <= tolerance,
        "assertion failed: {a} is not within {tolerance} of {b}"
    );
}
