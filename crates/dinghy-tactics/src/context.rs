//! Inputs and outputs of the steering rules.
//!
//! Rules are pure functions of a `SteeringContext`. No ECS dependency:
//! the context is assembled from plain data each tick.

use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::constants::MARK_OFFSET_LENGTHS;
use dinghy_core::course::Leg;
use dinghy_core::decision::Decision;
use dinghy_core::enums::{LegType, RoundingSense, Tack};
use dinghy_core::flow::Flow;
use dinghy_core::types::Location;

/// What a boat knows about itself this tick.
#[derive(Debug, Clone, Copy)]
pub struct BoatView<'a> {
    pub position: Location,
    pub heading: Angle,
    /// Wind at the boat's position.
    pub wind: Flow,
    pub metrics: &'a BoatMetrics,
    pub prefs: &'a BoatPreferences,
}

/// Everything a steering rule looks at for one boat on one leg.
#[derive(Debug, Clone, Copy)]
pub struct SteeringContext<'a> {
    pub position: Location,
    pub heading: Angle,
    /// Wind at the boat's position.
    pub wind: Flow,
    /// Mean wind bearing at the leg's mark.
    pub mean_wind: Angle,
    pub leg: &'a Leg,
    pub leg_type: LegType,
    pub metrics: &'a BoatMetrics,
    pub prefs: &'a BoatPreferences,
}

/// A rule's decision together with a short reason for the decision log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub decision: Decision,
    pub reason: &'static str,
}

impl Verdict {
    pub fn new(decision: Decision, reason: &'static str) -> Self {
        Self { decision, reason }
    }

    pub fn sail_on(reason: &'static str) -> Self {
        Self::new(Decision::sail_on(), reason)
    }
}

impl<'a> SteeringContext<'a> {
    pub fn new(boat: &BoatView<'a>, leg: &'a Leg, leg_type: LegType, mean_wind: Angle) -> Self {
        Self {
            position: boat.position,
            heading: boat.heading,
            wind: boat.wind,
            mean_wind,
            leg,
            leg_type,
            metrics: boat.metrics,
            prefs: boat.prefs,
        }
    }

    /// Tack the boat is on in the local wind.
    pub fn tack(&self) -> Tack {
        Tack::of(self.heading, self.wind.bearing)
    }

    /// Distance of the aim point from the mark.
    pub fn mark_offset(&self) -> f64 {
        MARK_OFFSET_LENGTHS * self.metrics.length
    }

    /// Heading on which the boat is expected to arrive at the mark.
    ///
    /// Beats and gybing legs arrive on the tack that leaves the mark on the
    /// rounding side; offwind legs arrive along the leg.
    pub fn approach_heading(&self) -> Angle {
        match self.leg_type {
            LegType::Windward => {
                laying_tack(self.leg_type, self.leg.rounding)
                    .course(self.mean_wind, self.metrics.upwind_relative)
            }
            LegType::GybingDownwind => {
                laying_tack(self.leg_type, self.leg.rounding)
                    .course(self.mean_wind, self.metrics.downwind_relative)
            }
            LegType::Offwind | LegType::None => {
                self.leg.bearing().unwrap_or(self.heading)
            }
        }
    }

    /// Point beside the mark the boat steers for.
    pub fn aim_point(&self) -> Location {
        self.leg.aim_point(self.approach_heading(), self.mark_offset())
    }
}

/// Tack a boat lays the mark on for a given rounding.
///
/// A port rounding at the top is fetched on starboard tack; at the bottom
/// of a run it is fetched on port gybe.
pub fn laying_tack(leg_type: LegType, rounding: RoundingSense) -> Tack {
    match (leg_type, rounding) {
        (LegType::Windward, RoundingSense::Port) => Tack::Starboard,
        (LegType::Windward, RoundingSense::Starboard) => Tack::Port,
        (_, RoundingSense::Port) => Tack::Port,
        (_, RoundingSense::Starboard) => Tack::Starboard,
    }
}
