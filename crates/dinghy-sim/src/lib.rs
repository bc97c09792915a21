//! Race simulation for the dinghy steering engine.
//!
//! Owns the hecs ECS world of boats, runs the steering, movement and leg
//! systems at a fixed time step, and produces `RaceSnapshot`s.

pub mod components;
pub mod engine;
pub mod kinematics;
pub mod log;
pub mod systems;
pub mod world_setup;

pub use dinghy_core as core;
pub use dinghy_tactics as tactics;
pub use engine::{SimConfig, SimError, SimulationEngine};
pub use log::{DecisionLog, DecisionRecord, LogError, MemoryLog, TracingLog};
pub use world_setup::FleetEntry;
