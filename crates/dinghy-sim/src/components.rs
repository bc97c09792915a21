//! ECS components for boat entities.
//!
//! Components are plain data. Steering and integration logic lives in
//! systems and in the tactics crate.

use dinghy_core::angle::Angle;
use dinghy_core::decision::Decision;
use dinghy_core::types::Location;
use dinghy_tactics::Strategy;

/// Identity of a boat in the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boat {
    pub id: u32,
    pub name: String,
}

/// Kinematic state of the hull.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hull {
    pub location: Location,
    pub heading: Angle,
    /// Speed through the water (m/s).
    pub speed: f64,
}

/// The helm: the boat's strategy for its current leg and the decision
/// it produced this tick.
#[derive(Debug, Clone)]
pub struct Helm {
    pub strategy: Strategy,
    pub decision: Decision,
    pub reason: &'static str,
}

/// Race progress of one boat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    /// Leg being sailed. Equals the course length once finished.
    pub leg: usize,
    /// Tick on which the finish mark was rounded.
    pub finish_tick: Option<u64>,
    /// Set when a configuration fault takes the boat out of the race.
    pub retired: Option<String>,
}

impl Helm {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            decision: Decision::sail_on(),
            reason: "starting",
        }
    }
}

impl Progress {
    pub fn is_retired(&self) -> bool {
        self.retired.is_some()
    }
}
