//! Steering rules for the sailing phase of a leg.
//!
//! Beats and gybing legs share one rule chain, evaluated in priority order;
//! the first rule that fires decides the tick:
//!
//! 1. layline: the aim point has moved past the opposite tack's layline
//! 2. fetch: the aim point can be laid directly on this tack
//! 3. channel: the boat is outside the channel and still leaving it
//! 4. best tack/gybe: the other side is favoured by the current shift
//! 5. headed/lifted: react to the angle to the local wind
//!
//! Offwind legs simply steer for the aim point.

use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::constants::{CHANNEL_RELEASE_WIDTHS, COURSE_TOLERANCE};
use dinghy_core::decision::Decision;
use dinghy_core::enums::{LegType, Tack, TurnSense};

use crate::context::{SteeringContext, Verdict};

/// Beating upwind or gybing downwind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOfSail {
    Upwind,
    Downwind,
}

/// Sailing rule for one (leg type, tack) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SailingRule {
    Windward(Tack),
    Offwind,
    GybingDownwind(Tack),
}

impl PointOfSail {
    /// Nominal angle off the wind on this point of sail.
    pub fn off_wind(self, metrics: &BoatMetrics) -> f64 {
        match self {
            PointOfSail::Upwind => metrics.upwind_relative,
            PointOfSail::Downwind => metrics.downwind_relative,
        }
    }

    /// Deepest angle off the wind still sailed on this point of sail.
    fn deepest(self, metrics: &BoatMetrics) -> f64 {
        match self {
            PointOfSail::Upwind => 180.0,
            PointOfSail::Downwind => metrics.downwind_relative,
        }
    }

    fn plays_shifts(self, prefs: &BoatPreferences) -> bool {
        match self {
            PointOfSail::Upwind => prefs.sail_on_best_tack,
            PointOfSail::Downwind => prefs.sail_on_best_gybe,
        }
    }

    fn changes_if_headed(self, prefs: &BoatPreferences) -> bool {
        match self {
            PointOfSail::Upwind => prefs.tack_if_headed,
            PointOfSail::Downwind => prefs.gybe_if_headed,
        }
    }

    /// Rotation of a tack (through the wind) or gybe (through dead downwind)
    /// away from `from`.
    pub fn change_sense(self, from: Tack) -> TurnSense {
        match (self, from) {
            (PointOfSail::Upwind, Tack::Starboard) => TurnSense::Starboard,
            (PointOfSail::Upwind, Tack::Port) => TurnSense::Port,
            (PointOfSail::Downwind, Tack::Starboard) => TurnSense::Port,
            (PointOfSail::Downwind, Tack::Port) => TurnSense::Starboard,
        }
    }

    /// Tack that points closer to the mean wind axis after a shift.
    /// `None` when the local wind matches the mean.
    pub fn favoured_tack(self, wind: Angle, mean: Angle) -> Option<Tack> {
        let veered = if wind.gt(mean) {
            true
        } else if wind.lt(mean) {
            false
        } else {
            return None;
        };
        Some(match (self, veered) {
            (PointOfSail::Upwind, true) | (PointOfSail::Downwind, false) => Tack::Starboard,
            (PointOfSail::Upwind, false) | (PointOfSail::Downwind, true) => Tack::Port,
        })
    }
}

impl SailingRule {
    /// Rule for a leg type and tack. `None` has no sailing rule.
    pub fn select(leg_type: LegType, tack: Tack) -> Option<Self> {
        match leg_type {
            LegType::Windward => Some(SailingRule::Windward(tack)),
            LegType::Offwind => Some(SailingRule::Offwind),
            LegType::GybingDownwind => Some(SailingRule::GybingDownwind(tack)),
            LegType::None => None,
        }
    }

    pub fn evaluate(&self, ctx: &SteeringContext) -> Verdict {
        match *self {
            SailingRule::Windward(tack) => tacking_rules(ctx, PointOfSail::Upwind, tack),
            SailingRule::GybingDownwind(tack) => tacking_rules(ctx, PointOfSail::Downwind, tack),
            SailingRule::Offwind => steer_for_aim(ctx),
        }
    }
}

fn tacking_rules(ctx: &SteeringContext, point: PointOfSail, tack: Tack) -> Verdict {
    let aim_bearing = ctx.position.bearing_to(&ctx.aim_point());

    layline(ctx, point, tack, aim_bearing)
        .or_else(|| fetch(ctx, point, tack, aim_bearing))
        .or_else(|| channel(ctx, point, tack))
        .or_else(|| best_side(ctx, point, tack))
        .or_else(|| headed_or_lifted(ctx, point, tack))
        .unwrap_or_else(|| Verdict::sail_on("holding course"))
}

/// Decision to switch onto the other tack or gybe.
pub fn change_tack(ctx: &SteeringContext, point: PointOfSail, tack: Tack) -> Decision {
    let target = tack
        .opposite()
        .course(ctx.wind.bearing, point.off_wind(ctx.metrics));
    Decision::turn(target, point.change_sense(tack))
}

/// Switch sides once the bearing to the aim point falls in the quadrant
/// between the opposite tack's course and the reciprocal of the heading.
/// Both edges of the quadrant count.
pub fn layline(
    ctx: &SteeringContext,
    point: PointOfSail,
    tack: Tack,
    aim_bearing: Angle,
) -> Option<Verdict> {
    let opposite = tack
        .opposite()
        .course(ctx.wind.bearing, point.off_wind(ctx.metrics));
    let reciprocal = ctx.heading.reciprocal();
    let beyond = match (point, tack) {
        (PointOfSail::Upwind, Tack::Starboard) | (PointOfSail::Downwind, Tack::Port) => {
            aim_bearing.is_within(opposite, reciprocal)
        }
        (PointOfSail::Upwind, Tack::Port) | (PointOfSail::Downwind, Tack::Starboard) => {
            aim_bearing.is_within(reciprocal, opposite)
        }
    };
    beyond.then(|| {
        let reason = match point {
            PointOfSail::Upwind => "on the layline: tacking",
            PointOfSail::Downwind => "on the layline: gybing",
        };
        Verdict::new(change_tack(ctx, point, tack), reason)
    })
}

/// Steer straight for the aim point when it lies inside the sector this
/// tack can sail without pointing higher than its limit.
pub fn fetch(
    ctx: &SteeringContext,
    point: PointOfSail,
    tack: Tack,
    aim_bearing: Angle,
) -> Option<Verdict> {
    let wind = ctx.wind.bearing;
    let highest = tack.course(wind, ctx.metrics.upwind_relative);
    let deepest = tack.course(wind, point.deepest(ctx.metrics));
    let fetchable = match tack {
        Tack::Starboard => aim_bearing.is_within(deepest, highest),
        Tack::Port => aim_bearing.is_within(highest, deepest),
    };
    if !fetchable {
        return None;
    }
    if ctx.heading.abs_diff(aim_bearing) > COURSE_TOLERANCE {
        Some(Verdict::new(
            Decision::turn_shortest(ctx.heading, aim_bearing),
            "fetching the aim point",
        ))
    } else {
        Some(Verdict::sail_on("laying the aim point"))
    }
}

/// Return towards the rhumb line when outside the channel and still
/// heading further out. Released near the mark.
pub fn channel(ctx: &SteeringContext, point: PointOfSail, tack: Tack) -> Option<Verdict> {
    let channel = ctx.prefs.channel?;
    let cross_track = ctx.leg.cross_track(&ctx.position);
    if cross_track.abs() <= channel.half_width {
        return None;
    }
    if ctx.leg.distance_to_end(&ctx.position) <= channel.half_width * CHANNEL_RELEASE_WIDTHS {
        return None;
    }
    let drift = ctx.heading.signed_diff(ctx.leg.bearing()?);
    let leaving = (cross_track > 0.0 && drift > 0.0) || (cross_track < 0.0 && drift < 0.0);
    leaving.then(|| Verdict::new(change_tack(ctx, point, tack), "leaving the channel"))
}

/// Switch to the tack favoured by the current shift.
pub fn best_side(ctx: &SteeringContext, point: PointOfSail, tack: Tack) -> Option<Verdict> {
    if !point.plays_shifts(ctx.prefs) {
        return None;
    }
    let favoured = point.favoured_tack(ctx.wind.bearing, ctx.mean_wind)?;
    (favoured != tack).then(|| {
        let reason = match point {
            PointOfSail::Upwind => "tacking onto the favoured tack",
            PointOfSail::Downwind => "gybing onto the favoured gybe",
        };
        Verdict::new(change_tack(ctx, point, tack), reason)
    })
}

/// React to the true wind angle drifting from the nominal one.
pub fn headed_or_lifted(ctx: &SteeringContext, point: PointOfSail, tack: Tack) -> Option<Verdict> {
    let off_wind = point.off_wind(ctx.metrics);
    let wind_angle = ctx.wind.bearing.abs_diff(ctx.heading);
    let own_course = tack.course(ctx.wind.bearing, off_wind);

    if wind_angle < off_wind - COURSE_TOLERANCE {
        if point.changes_if_headed(ctx.prefs) {
            return Some(Verdict::new(change_tack(ctx, point, tack), "headed: changing tack"));
        }
        if ctx.prefs.bear_away_if_headed {
            return Some(Verdict::new(
                Decision::turn_shortest(ctx.heading, own_course),
                "headed: bearing away",
            ));
        }
    } else if wind_angle > off_wind + COURSE_TOLERANCE && ctx.prefs.luff_up_if_lifted {
        return Some(Verdict::new(
            Decision::turn_shortest(ctx.heading, own_course),
            "lifted: luffing up",
        ));
    }
    None
}

/// Offwind steering: point at the aim point, shortest way round, but never
/// higher than close-hauled.
pub fn steer_for_aim(ctx: &SteeringContext) -> Verdict {
    let aim_bearing = ctx.position.bearing_to(&ctx.aim_point());
    let target = clamp_to_close_hauled(aim_bearing, ctx.wind.bearing, ctx.metrics.upwind_relative);
    if ctx.heading.abs_diff(target) > COURSE_TOLERANCE {
        Verdict::new(
            Decision::turn_shortest(ctx.heading, target),
            "steering for the aim point",
        )
    } else {
        Verdict::sail_on("on course for the aim point")
    }
}

/// Nearest heading to `bearing` that is at least `upwind` off the wind.
pub fn clamp_to_close_hauled(bearing: Angle, wind: Angle, upwind: f64) -> Angle {
    let off = bearing.signed_diff(wind);
    if off.abs() >= upwind {
        bearing
    } else if off >= 0.0 {
        Tack::Port.course(wind, upwind)
    } else {
        Tack::Starboard.course(wind, upwind)
    }
}
