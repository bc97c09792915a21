//! ECS systems that operate on the race world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They hold no state of their own; all state lives in components.

pub mod legs;
pub mod movement;
pub mod snapshot;
pub mod steering;
