//! Core types and definitions for the dinghy steering engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! angles, course geometry, boat metrics and preferences, decisions,
//! flow-field interfaces, errors and constants.
//! It has no dependency on any simulation runtime.

pub mod angle;
pub mod boat;
pub mod constants;
pub mod course;
pub mod decision;
pub mod enums;
pub mod errors;
pub mod flow;
pub mod state;
pub mod types;

pub use angle::Angle;
pub use types::{DistanceVector, Location, SimTime};
