//! Entity spawn factories for setting up the race world.
//!
//! Lays out a start line across the wind at the start of the first leg and
//! spawns one boat entity per fleet entry with its component bundle.

use std::sync::Arc;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::constants::START_STAGGER;
use dinghy_core::course::Course;
use dinghy_core::enums::Tack;
use dinghy_core::types::{DistanceVector, Location};
use dinghy_tactics::Strategy;

use crate::components::{Boat, Helm, Hull, Progress};

/// One boat to enter in the race.
#[derive(Debug, Clone)]
pub struct FleetEntry {
    pub name: String,
    pub metrics: Arc<BoatMetrics>,
    pub prefs: BoatPreferences,
}

/// Starting position and heading for one boat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartSlot {
    pub location: Location,
    pub heading: Angle,
}

impl FleetEntry {
    pub fn new(name: impl Into<String>, metrics: Arc<BoatMetrics>, prefs: BoatPreferences) -> Self {
        Self {
            name: name.into(),
            metrics,
            prefs,
        }
    }
}

/// Heading a boat starts on: close-hauled on starboard when the first leg
/// is a beat, otherwise straight down the leg.
pub fn start_heading(course: &Course, mean_wind: Angle, metrics: &BoatMetrics) -> Angle {
    let Some(bearing) = course.first_leg().and_then(|leg| leg.bearing()) else {
        return Tack::Starboard.course(mean_wind, metrics.upwind_relative);
    };
    if bearing.abs_diff(mean_wind) <= metrics.upwind_relative {
        Tack::Starboard.course(mean_wind, metrics.upwind_relative)
    } else {
        bearing
    }
}

/// Spread `count` boats evenly along a start line square to the wind,
/// `spread` meters either side of the first leg's start. Each boat is
/// jittered along the line and staggered a random distance behind it.
pub fn start_slots(
    course: &Course,
    mean_wind: Angle,
    entries: &[FleetEntry],
    spread: f64,
    rng: &mut ChaCha8Rng,
) -> Vec<StartSlot> {
    let origin = course.first_leg().map(|leg| leg.start).unwrap_or_default();
    let along = mean_wind + 90.0;
    let behind = mean_wind.reciprocal();
    let count = entries.len();
    let spacing = if count > 1 {
        2.0 * spread / (count - 1) as f64
    } else {
        0.0
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let nominal = if count > 1 {
                -spread + spacing * i as f64
            } else {
                0.0
            };
            let jitter = if spacing > 0.0 {
                rng.gen_range(-0.25..0.25) * spacing
            } else {
                0.0
            };
            let stagger = rng.gen_range(0.0..START_STAGGER);
            let location = origin
                .offset(&DistanceVector::new(nominal + jitter, along))
                .offset(&DistanceVector::new(stagger, behind));
            StartSlot {
                location,
                heading: start_heading(course, mean_wind, &entry.metrics),
            }
        })
        .collect()
}

/// Spawn a single boat entity.
pub fn spawn_boat(
    world: &mut World,
    id: u32,
    entry: &FleetEntry,
    slot: StartSlot,
    strategy: Strategy,
) -> Entity {
    world.spawn((
        Boat {
            id,
            name: entry.name.clone(),
        },
        Hull {
            location: slot.location,
            heading: slot.heading,
            speed: 0.0,
        },
        Helm::new(strategy),
        Arc::clone(&entry.metrics),
        entry.prefs,
        Progress::default(),
    ))
}
