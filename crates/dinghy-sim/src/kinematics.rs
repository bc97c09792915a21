//! Per-tick integration of a boat's heading, speed and position.
//!
//! Pure functions over plain data; the movement system applies them to
//! every hull in the world.

use glam::DVec2;

use dinghy_core::boat::BoatMetrics;
use dinghy_core::decision::Decision;
use dinghy_core::enums::Action;
use dinghy_core::flow::Flow;
use dinghy_core::types::DistanceVector;

use crate::components::Hull;

/// Rotate the hull towards the decision's target in the decision's sense,
/// no further than the boat can turn in `dt`. When the target is reached
/// the heading snaps onto it and the decision resets to sail on.
///
/// Returns true when this completes a mark rounding.
pub fn apply_turn(hull: &mut Hull, decision: &mut Decision, metrics: &BoatMetrics, dt: f64) -> bool {
    if !decision.is_turning() {
        return false;
    }
    let limit = metrics.turn_limit(hull.speed, dt);
    let remaining = decision.sense.rotation(hull.heading, decision.target);
    if remaining <= limit {
        hull.heading = decision.target;
        let rounded = decision.action == Action::MarkRounding;
        decision.reset();
        rounded
    } else {
        hull.heading = decision.sense.rotate(hull.heading, limit);
        false
    }
}

/// Move the speed a fraction `inertia` of the way towards the polar speed
/// for the local wind.
pub fn update_speed(hull: &mut Hull, metrics: &BoatMetrics, wind: Flow) {
    let wind_angle = wind.bearing.abs_diff(hull.heading);
    let potential = metrics.polar.boat_speed(wind_angle, wind.speed);
    hull.speed += (potential - hull.speed) * metrics.inertia;
}

/// Advance the hull along its heading, set by the water current.
pub fn advance_position(hull: &mut Hull, water: Flow, dt: f64) {
    let through_water: DVec2 = DistanceVector::new(hull.speed, hull.heading).to_dvec2();
    let over_ground = (through_water + water.to_dvec2()) * dt;
    hull.location = hull.location.offset(&DistanceVector::from_dvec2(over_ground));
}

/// One full integration step. A stopped boat neither turns nor moves.
///
/// Returns true when this step completes a mark rounding.
pub fn step(
    hull: &mut Hull,
    decision: &mut Decision,
    metrics: &BoatMetrics,
    wind: Flow,
    water: Flow,
    dt: f64,
) -> bool {
    if decision.action == Action::Stop {
        hull.speed = 0.0;
        return false;
    }
    let rounded = apply_turn(hull, decision, metrics, dt);
    update_speed(hull, metrics, wind);
    advance_position(hull, water, dt);
    rounded
}
