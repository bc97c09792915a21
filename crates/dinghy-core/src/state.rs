//! Race snapshot: the complete visible state of the race after each tick.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::enums::{Action, LegType};
use crate::flow::Flow;
use crate::types::{Location, SimTime};

/// Everything an observer sees after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub time: SimTime,
    /// Wind at the first mark.
    pub wind: Flow,
    pub boats: Vec<BoatStatus>,
    /// Boats that have rounded the finish mark.
    pub finished: usize,
}

/// Where a boat is in its current leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegPhase {
    #[default]
    Sailing,
    Rounding,
    Finished,
    Retired,
}

/// One boat as seen in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoatStatus {
    pub id: u32,
    pub name: String,
    pub location: Location,
    pub heading: Angle,
    /// Speed through the water (m/s).
    pub speed: f64,
    /// Index of the leg being sailed; equals the leg count after the finish.
    pub leg: usize,
    pub leg_type: LegType,
    pub phase: LegPhase,
    /// Action decided this tick.
    pub action: Action,
    pub finish_tick: Option<u64>,
}

impl RaceSnapshot {
    /// Whether every boat has finished and stopped, or retired.
    pub fn race_over(&self) -> bool {
        self.boats.iter().all(|b| match b.phase {
            LegPhase::Finished => b.action == Action::Stop,
            LegPhase::Retired => true,
            _ => false,
        })
    }
}
