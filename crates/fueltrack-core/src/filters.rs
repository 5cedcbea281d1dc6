//! Filtering module for fill events
//!
//! Narrows a fill log down to a date range and/or a single vehicle before it
//! reaches the analytics engine.
//!
//! # Examples
//!
//! ```
//! use fueltrack_core::filters::FillFilter;
//! use fueltrack_core::types::{FillDate, VehicleId};
//!
//! // Fills of car-1 during the first quarter of 2024
//! let filter = FillFilter::new()
//!     .with_since(FillDate::from_ymd(2024, 1, 1).unwrap())
//!     .with_until(FillDate::from_ymd(2024, 3, 31).unwrap())
//!     .with_vehicle(VehicleId::new("car-1"));
//! ```

use crate::types::{FillDate, FillEvent, VehicleId};

/// Filter configuration for fill events
///
/// All filters are optional and can be combined. Date bounds are inclusive.
#[derive(Debug, Default, Clone)]
pub struct FillFilter {
    /// Start date filter (inclusive)
    pub since_date: Option<FillDate>,
    /// End date filter (inclusive)
    pub until_date: Option<FillDate>,
    /// Vehicle filter
    pub vehicle: Option<VehicleId>,
}

impl FillFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: FillDate) -> Self {
        self.since_date = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: FillDate) -> Self {
        self.until_date = Some(date);
        self
    }

    /// Set the vehicle filter
    pub fn with_vehicle(mut self, vehicle: VehicleId) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    /// Check if a fill passes the filter
    pub fn matches(&self, event: &FillEvent) -> bool {
        if let Some(since) = &self.since_date
            && event.filled_at < *since
        {
            return false;
        }

        if let Some(until) = &self.until_date
            && event.filled_at > *until
        {
            return false;
        }

        if let Some(vehicle) = &self.vehicle
            && event.vehicle_id != *vehicle
        {
            return false;
        }

        true
    }

    /// Filter a stream of fills, passing errors through untouched
    pub fn filter_stream<S>(
        self,
        stream: S,
    ) -> impl futures::Stream<Item = crate::error::Result<FillEvent>>
    where
        S: futures::Stream<Item = crate::error::Result<FillEvent>>,
    {
        use futures::StreamExt;

        stream.filter_map(move |result| {
            let keep = match &result {
                Ok(event) => self.matches(event),
                Err(_) => true,
            };
            futures::future::ready(keep.then_some(result))
        })
    }
}
