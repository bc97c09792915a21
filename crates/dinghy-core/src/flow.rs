//! Wind and water flow-field interfaces.
//!
//! The engine only queries flows at a location; how a field is modelled
//! is up to the implementor. Two simple fields ship with the crate.
//!
//! Conventions: a wind bearing is the direction the wind blows FROM.
//! A water bearing is the direction the current sets TOWARDS.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::types::{DistanceVector, Location};

/// Flow sample: speed (m/s) and bearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub speed: f64,
    pub bearing: Angle,
}

impl Flow {
    pub fn new(speed: f64, bearing: Angle) -> Self {
        Self { speed, bearing }
    }

    /// Cartesian velocity of the flow along its bearing (m/s).
    pub fn to_dvec2(&self) -> DVec2 {
        DistanceVector::new(self.speed, self.bearing).to_dvec2()
    }
}

/// Queryable wind field.
pub trait WindField: Send + Sync {
    /// Local wind at a location.
    fn flow_at(&self, location: &Location) -> Flow;

    /// Mean wind bearing over the whole race area.
    fn mean_bearing(&self) -> Angle;

    /// Mean wind bearing around a location.
    fn mean_bearing_at(&self, _location: &Location) -> Angle {
        self.mean_bearing()
    }

    /// Advance time-varying fields by `dt` seconds.
    fn advance(&mut self, _dt: f64) {}
}

/// Queryable water-current field.
pub trait WaterField: Send + Sync {
    fn flow_at(&self, location: &Location) -> Flow;

    fn advance(&mut self, _dt: f64) {}
}

/// The same flow everywhere, forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UniformFlow {
    pub flow: Flow,
}

impl UniformFlow {
    pub fn new(speed: f64, bearing: Angle) -> Self {
        Self {
            flow: Flow::new(speed, bearing),
        }
    }

    /// No flow at all (still water).
    pub fn calm() -> Self {
        Self::default()
    }
}

impl WindField for UniformFlow {
    fn flow_at(&self, _location: &Location) -> Flow {
        self.flow
    }

    fn mean_bearing(&self) -> Angle {
        self.flow.bearing
    }
}

impl WaterField for UniformFlow {
    fn flow_at(&self, _location: &Location) -> Flow {
        self.flow
    }
}

/// Wind that swings sinusoidally about a mean bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatingWind {
    pub mean: Angle,
    pub speed: f64,
    /// Peak shift either side of the mean (degrees).
    pub amplitude: f64,
    /// Period of one full oscillation (seconds).
    pub period: f64,
    /// Elapsed simulation time (seconds).
    #[serde(default)]
    pub elapsed: f64,
}

impl OscillatingWind {
    pub fn new(mean: Angle, speed: f64, amplitude: f64, period: f64) -> Self {
        Self {
            mean,
            speed,
            amplitude,
            period,
            elapsed: 0.0,
        }
    }

    /// Current shift from the mean (degrees, positive = veered clockwise).
    pub fn shift(&self) -> f64 {
        if self.period <= 0.0 {
            return 0.0;
        }
        self.amplitude * (TAU * self.elapsed / self.period).sin()
    }
}

impl WindField for OscillatingWind {
    fn flow_at(&self, _location: &Location) -> Flow {
        Flow::new(self.speed, self.mean + self.shift())
    }

    fn mean_bearing(&self) -> Angle {
        self.mean
    }

    fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }
}
