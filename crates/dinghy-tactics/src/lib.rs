//! Steering tactics for racing dinghies.
//!
//! Classifies legs against the wind, chooses a sailing or rounding rule for
//! each boat, and turns the boat's situation into a `Decision` every tick.
//! No ECS dependency: everything operates on plain data.

pub mod classify;
pub mod context;
pub mod rounding;
pub mod sailing;
pub mod strategy;

pub use dinghy_core as core;

pub use context::{BoatView, SteeringContext, Verdict};
pub use strategy::{validate_course, Phase, Strategy};

#[cfg(test)]
mod tests;
