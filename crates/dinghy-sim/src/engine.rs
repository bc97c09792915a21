//! Race engine.
//!
//! `SimulationEngine` owns the hecs world of boats, the shared course and
//! the wind and water fields. Each tick it runs steering, movement and leg
//! bookkeeping in that order and returns a `RaceSnapshot`. Completely
//! headless and deterministic for a given seed.

use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use dinghy_core::constants::{DT, START_SPREAD};
use dinghy_core::course::Course;
use dinghy_core::errors::ConfigError;
use dinghy_core::flow::{WaterField, WindField};
use dinghy_core::state::RaceSnapshot;
use dinghy_core::types::SimTime;
use dinghy_tactics::{validate_course, Strategy};

use crate::components::Progress;
use crate::log::{DecisionLog, TracingLog};
use crate::systems;
use crate::world_setup::{self, FleetEntry, StartSlot};

/// Configuration for a new race.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// RNG seed for the start line. Same seed, same race.
    pub seed: u64,
    /// Seconds per tick.
    pub dt: f64,
    /// Half-length of the start line (meters).
    pub start_spread: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dt: DT,
            start_spread: START_SPREAD,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("boat {boat}: {source}")]
    BoatConfig {
        boat: String,
        #[source]
        source: ConfigError,
    },
}

/// The race engine. Owns the ECS world and all race state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    dt: f64,
    start_spread: f64,
    rng: ChaCha8Rng,
    course: Arc<Course>,
    wind: Box<dyn WindField>,
    water: Box<dyn WaterField>,
    log: Box<dyn DecisionLog>,
    next_boat_id: u32,
    log_rejections: usize,
}

impl SimulationEngine {
    pub fn new(
        config: SimConfig,
        course: Arc<Course>,
        wind: Box<dyn WindField>,
        water: Box<dyn WaterField>,
    ) -> Result<Self, SimError> {
        if !(config.dt.is_finite() && config.dt > 0.0) {
            return Err(SimError::InvalidTimeStep(config.dt));
        }
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            dt: config.dt,
            start_spread: config.start_spread,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            course,
            wind,
            water,
            log: Box::new(TracingLog),
            next_boat_id: 0,
            log_rejections: 0,
        })
    }

    /// Replace the decision log sink.
    pub fn with_log(mut self, log: Box<dyn DecisionLog>) -> Self {
        self.log = log;
        self
    }

    /// Add one boat at an explicit start slot. Every leg's strategy is built
    /// up front, so a course the boat cannot sail is rejected here.
    pub fn add_boat(&mut self, entry: &FleetEntry, slot: StartSlot) -> Result<Entity, SimError> {
        let config_err = |source| SimError::BoatConfig {
            boat: entry.name.clone(),
            source,
        };
        validate_course(&self.course, &entry.metrics, &entry.prefs, self.wind.as_ref())
            .map_err(config_err)?;
        let strategy = Strategy::for_leg(
            &self.course,
            0,
            &entry.metrics,
            &entry.prefs,
            self.wind.as_ref(),
        )
        .map_err(config_err)?;

        let id = self.next_boat_id;
        self.next_boat_id += 1;
        debug!(boat = id, name = %entry.name, "boat entered");
        Ok(world_setup::spawn_boat(&mut self.world, id, entry, slot, strategy))
    }

    /// Lay out a start line for the fleet and add every boat to it.
    pub fn add_fleet(&mut self, entries: &[FleetEntry]) -> Result<Vec<Entity>, SimError> {
        let mean_wind = self.wind.mean_bearing();
        let slots = world_setup::start_slots(
            &self.course,
            mean_wind,
            entries,
            self.start_spread,
            &mut self.rng,
        );
        entries
            .iter()
            .zip(slots)
            .map(|(entry, slot)| self.add_boat(entry, slot))
            .collect()
    }

    /// Advance the race by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> RaceSnapshot {
        self.run_systems();
        self.wind.advance(self.dt);
        self.water.advance(self.dt);
        self.time.advance(self.dt);
        self.snapshot()
    }

    /// Tick until every boat has finished and stopped (or retired), or
    /// `max_ticks` have run. Returns the last snapshot.
    pub fn run_until_finished(&mut self, max_ticks: u64) -> RaceSnapshot {
        let mut snapshot = self.snapshot();
        for _ in 0..max_ticks {
            snapshot = self.tick();
            if snapshot.race_over() {
                break;
            }
        }
        snapshot
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> RaceSnapshot {
        let wind = match self.course.first_leg() {
            Some(leg) => self.wind.flow_at(&leg.end),
            None => self.wind.flow_at(&Default::default()),
        };
        systems::snapshot::build_snapshot(&self.world, &self.time, wind)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn course(&self) -> &Arc<Course> {
        &self.course
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of boats that have retired.
    pub fn retired(&self) -> usize {
        self.world
            .query::<&Progress>()
            .iter()
            .filter(|(_, p)| p.is_retired())
            .count()
    }

    /// Decision records the log has refused so far.
    pub fn log_rejections(&self) -> usize {
        self.log_rejections
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Strategy decisions
        let refused = systems::steering::run(
            &mut self.world,
            self.wind.as_ref(),
            self.log.as_mut(),
            self.time.tick,
        );
        if refused > 0 && self.log_rejections == 0 {
            warn!(refused, "decision log refused records; continuing without them");
        }
        self.log_rejections += refused;
        // 2. Turn, accelerate, move
        let rounded = systems::movement::run(
            &mut self.world,
            self.wind.as_ref(),
            self.water.as_ref(),
            self.dt,
        );
        // 3. Leg advance for completed roundings
        systems::legs::run(
            &mut self.world,
            &rounded,
            &self.course,
            self.wind.as_ref(),
            self.time.tick,
        );
    }
}
