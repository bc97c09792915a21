//! Mark-rounding rules.
//!
//! A rounding runs in two stages. While approaching, the boat works
//! towards the aim point beside the mark, turning back for it if it falls
//! behind the beam. Once the mark falls into the rear quadrant on the
//! rounding side, the turn is latched and the boat rotates in the rounding
//! direction onto the course for the next leg, in steps of at most
//! `MAX_ROUNDING_STEP` degrees.

use serde::{Deserialize, Serialize};

use dinghy_core::angle::Angle;
use dinghy_core::boat::BoatMetrics;
use dinghy_core::constants::{MAX_ROUNDING_STEP, ROUNDING_ASTERN_TOLERANCE};
use dinghy_core::decision::Decision;
use dinghy_core::enums::{LegType, RoundingSense, Tack, TurnSense};
use dinghy_core::errors::ConfigError;

use crate::context::{SteeringContext, Verdict};
use crate::sailing::{self, PointOfSail};

/// Stage within the rounding phase. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingStage {
    #[default]
    Approach,
    Turning,
}

/// Course the boat settles on after the mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FinalCourse {
    /// Whichever of the two headings `off_wind` degrees either side of the
    /// wind is reached first turning in the rounding direction.
    FixedOffsetFromWind { off_wind: f64 },
    /// The bearing of the next leg.
    FollowingLegBearing(Angle),
    /// Keep the current heading (finish mark).
    HoldHeading,
}

/// Rounding behaviour for one leg-type transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingRule {
    pub this_leg: LegType,
    pub next_leg: LegType,
    pub sense: RoundingSense,
    pub final_course: FinalCourse,
}

impl FinalCourse {
    /// Final course onto a following leg of type `next_leg`.
    pub fn for_next_leg(
        next_leg: LegType,
        next_bearing: Option<Angle>,
        metrics: &BoatMetrics,
    ) -> Option<Self> {
        match next_leg {
            LegType::Windward => Some(FinalCourse::FixedOffsetFromWind {
                off_wind: metrics.upwind_relative,
            }),
            LegType::GybingDownwind => Some(FinalCourse::FixedOffsetFromWind {
                off_wind: metrics.downwind_relative,
            }),
            LegType::Offwind => next_bearing.map(FinalCourse::FollowingLegBearing),
            LegType::None => Some(FinalCourse::HoldHeading),
        }
    }

    /// Heading to finish the rounding on, given the current heading and
    /// local wind.
    pub fn resolve(&self, heading: Angle, wind: Angle, turn: TurnSense) -> Angle {
        match *self {
            FinalCourse::FixedOffsetFromWind { off_wind } => {
                let port = Tack::Port.course(wind, off_wind);
                let starboard = Tack::Starboard.course(wind, off_wind);
                if turn.rotation(heading, port) <= turn.rotation(heading, starboard) {
                    port
                } else {
                    starboard
                }
            }
            FinalCourse::FollowingLegBearing(bearing) => bearing,
            FinalCourse::HoldHeading => heading,
        }
    }
}

/// Turn back for an aim point that has fallen behind the beam, never
/// pointing higher than close-hauled.
fn recover(ctx: &SteeringContext, aim_bearing: Angle) -> Option<Verdict> {
    if ctx.heading.abs_diff(aim_bearing) <= 90.0 {
        return None;
    }
    let target = sailing::clamp_to_close_hauled(aim_bearing, ctx.wind.bearing, ctx.metrics.upwind_relative);
    Some(Verdict::new(
        Decision::turn_shortest(ctx.heading, target),
        "turning back for the aim point",
    ))
}

impl RoundingRule {
    /// Rule for rounding from a `this_leg` leg onto a `next_leg` leg.
    pub fn new(
        this_leg: LegType,
        next_leg: LegType,
        sense: RoundingSense,
        next_bearing: Option<Angle>,
        metrics: &BoatMetrics,
    ) -> Result<Self, ConfigError> {
        let unsupported = ConfigError::UnsupportedTransition {
            this_leg,
            next_leg,
            rounding: sense,
        };
        if this_leg == LegType::None {
            return Err(unsupported);
        }
        let final_course =
            FinalCourse::for_next_leg(next_leg, next_bearing, metrics).ok_or(unsupported)?;
        Ok(Self {
            this_leg,
            next_leg,
            sense,
            final_course,
        })
    }

    /// Whether the mark lies in the rear quadrant on the rounding side, or
    /// just past dead astern on the other side.
    pub fn triggered(&self, ctx: &SteeringContext) -> bool {
        let mark_bearing = ctx.position.bearing_to(&ctx.leg.end);
        let (from, to) = match self.sense {
            RoundingSense::Port => (
                ctx.heading + (180.0 - ROUNDING_ASTERN_TOLERANCE),
                ctx.heading + 270.0,
            ),
            RoundingSense::Starboard => (
                ctx.heading + 90.0,
                ctx.heading + (180.0 + ROUNDING_ASTERN_TOLERANCE),
            ),
        };
        mark_bearing.is_within(from, to)
    }

    /// Decide one tick of the rounding. Latches `stage` to `Turning` the
    /// first time the trigger fires.
    pub fn evaluate(&self, ctx: &SteeringContext, stage: &mut RoundingStage) -> Verdict {
        if *stage == RoundingStage::Approach {
            if !self.triggered(ctx) {
                return self.approach(ctx);
            }
            *stage = RoundingStage::Turning;
        }
        self.turn(ctx)
    }

    fn approach(&self, ctx: &SteeringContext) -> Verdict {
        let aim = ctx.aim_point();
        let distance = ctx.position.distance_to(&aim);
        let aim_bearing = ctx.position.bearing_to(&aim);

        // Hold course through the aim point until the mark comes abeam.
        if distance <= f64::EPSILON
            || (distance < 2.0 * ctx.mark_offset() && ctx.heading.abs_diff(aim_bearing) > 90.0)
        {
            return Verdict::sail_on("passing the aim point");
        }

        let point = match self.this_leg {
            LegType::Windward => PointOfSail::Upwind,
            LegType::GybingDownwind => PointOfSail::Downwind,
            LegType::Offwind | LegType::None => return sailing::steer_for_aim(ctx),
        };
        let tack = ctx.tack();
        sailing::layline(ctx, point, tack, aim_bearing)
            .or_else(|| sailing::fetch(ctx, point, tack, aim_bearing))
            .or_else(|| recover(ctx, aim_bearing))
            .unwrap_or_else(|| Verdict::sail_on("approaching the mark"))
    }

    fn turn(&self, ctx: &SteeringContext) -> Verdict {
        let turn = self.sense.turn();
        let target = self.final_course.resolve(ctx.heading, ctx.wind.bearing, turn);
        let remaining = turn.rotation(ctx.heading, target);
        if remaining > MAX_ROUNDING_STEP {
            Verdict::new(
                Decision::turn(turn.rotate(ctx.heading, MAX_ROUNDING_STEP), turn),
                "rounding: turning",
            )
        } else {
            Verdict::new(
                Decision::mark_rounding(target, turn),
                "rounding: onto the next leg",
            )
        }
    }
}
