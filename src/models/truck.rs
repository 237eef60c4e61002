//! Truck profiles shared by every vehicle of one echelon.

use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Capacity, work-duration limit and speed of a truck type.
///
/// Speed is in distance units per hour, durations are in minutes.
///
/// # Examples
///
/// ```
/// use swts_routing::models::TruckProfile;
///
/// let truck = TruckProfile::new(100, 480.0, 30.0);
/// assert_eq!(truck.capacity(), 100);
/// // 15 distance units at 30/h take half an hour.
/// assert!((truck.travel_time(15.0) - 30.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruckProfile {
    capacity: i32,
    work_duration: f64,
    speed: f64,
}

impl TruckProfile {
    /// Creates a truck profile.
    pub fn new(capacity: i32, work_duration: f64, speed: f64) -> Self {
        Self {
            capacity,
            work_duration,
            speed,
        }
    }

    /// Maximum load carried between two unloads.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Time budget of one route, in minutes.
    pub fn work_duration(&self) -> f64 {
        self.work_duration
    }

    /// Speed in distance units per hour.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Minutes needed to cover `distance`.
    pub fn travel_time(&self, distance: f64) -> f64 {
        distance / self.speed * MINUTES_PER_HOUR
    }

    /// Returns the first thing wrong with this profile, if any.
    pub(crate) fn defect(&self) -> Option<&'static str> {
        if self.capacity <= 0 {
            Some("capacity must be positive")
        } else if !(self.speed.is_finite() && self.speed > 0.0) {
            Some("speed must be positive")
        } else if !(self.work_duration.is_finite() && self.work_duration > 0.0) {
            Some("work duration must be positive")
        } else {
            None
        }
    }
}
