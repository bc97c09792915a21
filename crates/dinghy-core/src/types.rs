//! Fundamental geometric types on the course plane.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// 2D point on the course plane (meters, Cartesian).
/// x = East, y = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

/// Simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks run so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Polar vector: a distance along a compass bearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceVector {
    pub distance: f64,
    pub angle: Angle,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another location in meters.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Compass bearing to another location. Coincident points give North.
    pub fn bearing_to(&self, other: &Location) -> Angle {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return Angle::ZERO;
        }
        Angle::from_radians(dx.atan2(dy))
    }

    /// Polar vector from this location to `other`.
    pub fn vector_to(&self, other: &Location) -> DistanceVector {
        DistanceVector::new(self.distance_to(other), self.bearing_to(other))
    }

    /// The location reached by travelling `offset` from here.
    pub fn offset(&self, offset: &DistanceVector) -> Location {
        let d = offset.to_dvec2();
        Location::new(self.x + d.x, self.y + d.y)
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl DistanceVector {
    pub fn new(distance: f64, angle: Angle) -> Self {
        Self { distance, angle }
    }

    /// Build from a Cartesian offset. A zero offset points North.
    pub fn from_dvec2(v: DVec2) -> Self {
        let distance = v.length();
        if distance == 0.0 || !distance.is_finite() {
            return Self::default();
        }
        Self::new(distance, Angle::from_radians(v.x.atan2(v.y)))
    }

    /// Cartesian decomposition (x = East, y = North).
    pub fn to_dvec2(&self) -> DVec2 {
        let (sin, cos) = self.angle.radians().sin_cos();
        DVec2::new(self.distance * sin, self.distance * cos)
    }

    pub fn add(&self, other: &DistanceVector) -> DistanceVector {
        Self::from_dvec2(self.to_dvec2() + other.to_dvec2())
    }

    pub fn sub(&self, other: &DistanceVector) -> DistanceVector {
        Self::from_dvec2(self.to_dvec2() - other.to_dvec2())
    }

    pub fn scale(&self, factor: f64) -> DistanceVector {
        Self::from_dvec2(self.to_dvec2() * factor)
    }

    /// Length of this vector projected onto `axis`.
    /// Returns `None` when the vector points more than 90° away from the axis.
    pub fn projection_onto(&self, axis: Angle) -> Option<f64> {
        let off_axis = self.angle.abs_diff(axis);
        if off_axis > 90.0 {
            return None;
        }
        Some(self.distance * off_axis.to_radians().cos())
    }
}
