//! Core domain types for fueltrack
//!
//! This module contains the fundamental types used throughout the fueltrack
//! crates: strongly-typed identifiers, the calendar date a fill happened on,
//! and the fill event records themselves.

use crate::error::{FueltrackError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Strongly-typed vehicle identifier
///
/// # Examples
/// ```
/// use fueltrack_core::types::VehicleId;
///
/// let vehicle = VehicleId::new("car-1");
/// assert_eq!(vehicle.as_str(), "car-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(String);

impl VehicleId {
    /// Create a new VehicleId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier of a single fill event
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FillId(String);

impl FillId {
    /// Create a new FillId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar date a fill happened on
///
/// Fill logs only carry day precision. Parsing accepts a plain `YYYY-MM-DD`
/// date or a full RFC 3339 timestamp, in which case the UTC date is kept and
/// the time of day is dropped.
///
/// # Examples
/// ```
/// use fueltrack_core::types::FillDate;
///
/// let date: FillDate = "2024-03-15".parse().unwrap();
/// assert_eq!(date.format("%d/%m/%Y"), "15/03/2024");
///
/// let from_timestamp: FillDate = "2024-03-15T18:45:00Z".parse().unwrap();
/// assert_eq!(date, from_timestamp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FillDate(NaiveDate);

impl FillDate {
    /// Create a new FillDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create from year, month and day, returning None for impossible dates
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Create from a UTC timestamp
    pub fn from_timestamp(ts: &DateTime<Utc>) -> Self {
        Self(ts.date_naive())
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// Date `days` calendar days before this one, saturating at the earliest
    /// representable date
    pub fn days_before(&self, days: u64) -> Self {
        Self(
            self.0
                .checked_sub_days(chrono::Days::new(days))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl FromStr for FillDate {
    type Err = FueltrackError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(date));
        }

        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self::from_timestamp(&dt.with_timezone(&Utc)))
            .map_err(|_| {
                FueltrackError::InvalidDate(format!("'{s}'. Use YYYY-MM-DD or an RFC 3339 timestamp"))
            })
    }
}

impl TryFrom<String> for FillDate {
    type Error = FueltrackError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FillDate> for String {
    fn from(date: FillDate) -> Self {
        date.format("%Y-%m-%d")
    }
}

impl fmt::Display for FillDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One fuel purchase record
///
/// Field names follow snake_case; the storage column names (`car_id`,
/// `odometer_km`, `liters`, `price_per_l`) are accepted when deserializing.
///
/// # Examples
/// ```
/// use fueltrack_core::types::{FillDate, FillEvent};
///
/// let fill = FillEvent::new("f1", "car-1", FillDate::from_ymd(2024, 1, 10).unwrap(), 12_400.0, 38.5)
///     .with_total_cost(61.60);
/// assert!(!fill.is_partial);
/// assert_eq!(fill.cost(), 61.60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillEvent {
    /// Unique identifier of the fill
    pub id: FillId,
    /// Vehicle the fill belongs to
    #[serde(alias = "car_id")]
    pub vehicle_id: VehicleId,
    /// Day the fill happened
    pub filled_at: FillDate,
    /// Odometer reading at the time of the fill
    #[serde(alias = "odometer_km")]
    pub odometer_reading: f64,
    /// Quantity of fuel added
    #[serde(alias = "liters")]
    pub fuel_volume: f64,
    /// Price per unit of fuel
    #[serde(alias = "price_per_l", default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// Total amount paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    /// Whether the tank was left short of full
    #[serde(default)]
    pub is_partial: bool,
    /// Station name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FillEvent {
    /// Create a full fill with no pricing information
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        filled_at: FillDate,
        odometer_reading: f64,
        fuel_volume: f64,
    ) -> Self {
        Self {
            id: FillId::new(id),
            vehicle_id: VehicleId::new(vehicle_id),
            filled_at,
            odometer_reading,
            fuel_volume,
            unit_price: None,
            total_cost: None,
            is_partial: false,
            station: None,
            notes: None,
        }
    }

    /// Set the total amount paid
    pub fn with_total_cost(mut self, total_cost: f64) -> Self {
        self.total_cost = Some(total_cost);
        self
    }

    /// Set the price per unit of fuel
    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Mark the fill as partial
    pub fn partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    /// Whether this fill topped the tank up to capacity
    pub fn is_full(&self) -> bool {
        !self.is_partial
    }

    /// Monetary figure used for spend totals; a missing total counts as zero
    pub fn cost(&self) -> f64 {
        self.total_cost.unwrap_or(0.0)
    }

    /// Fill in whichever of `total_cost` / `unit_price` is missing from the other
    ///
    /// A missing total is `fuel_volume * unit_price`. A missing unit price is
    /// `total_cost / fuel_volume` when the volume is positive. Records that
    /// already carry both, or neither, are returned unchanged.
    pub fn with_completed_pricing(mut self) -> Self {
        match (self.unit_price, self.total_cost) {
            (Some(price), None) => {
                self.total_cost = Some(self.fuel_volume * price);
            }
            (None, Some(total)) if self.fuel_volume > 0.0 => {
                self.unit_price = Some(total / self.fuel_volume);
            }
            _ => {}
        }
        self
    }

    /// Chronological ordering used by every calculation
    ///
    /// Fills are ordered by date, then by odometer reading, then by id. The
    /// secondary keys make same-day fills order deterministically regardless
    /// of the order they were supplied in.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.filled_at
            .cmp(&other.filled_at)
            .then_with(|| self.odometer_reading.total_cmp(&other.odometer_reading))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Derived distance and efficiency of a full fill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillMetrics {
    /// Distance covered per unit of fuel since the previous full fill
    pub efficiency: f64,
    /// Odometer delta since the previous full fill
    pub distance_since_last_full: f64,
    /// Fuel put in since the previous full fill, this fill and the partial
    /// top-ups before it included
    pub fuel_consumed: f64,
}

/// A fill event together with its derived metrics, when computable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedFillEvent {
    /// The underlying fill
    #[serde(flatten)]
    pub event: FillEvent,
    /// Derived metrics; absent for partial fills, the first full fill and
    /// fills whose odometer did not advance
    #[serde(flatten)]
    pub metrics: Option<FillMetrics>,
}

impl EnrichedFillEvent {
    /// Wrap a fill with no derived metrics
    pub fn plain(event: FillEvent) -> Self {
        Self {
            event,
            metrics: None,
        }
    }

    /// Efficiency since the previous full fill
    pub fn efficiency(&self) -> Option<f64> {
        self.metrics.map(|m| m.efficiency)
    }

    /// Distance since the previous full fill
    pub fn distance_since_last_full(&self) -> Option<f64> {
        self.metrics.map(|m| m.distance_since_last_full)
    }
}
