//! Per-boat strategy for the current leg.
//!
//! A `LegStrategy` is built when a boat enters a leg and classifies the leg
//! once. Each tick it checks whether the boat has closed on the mark, then
//! dispatches to the sailing rule for the current tack or to the rounding
//! rule. After the finish mark the boat gets an `AfterFinish` strategy.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::constants::{
    AFTER_FINISH_STOP_LENGTHS, OFFWIND_ROUNDING_WIDTHS, WINDWARD_ROUNDING_LENGTHS,
};
use dinghy_core::course::{Course, Leg};
use dinghy_core::decision::Decision;
use dinghy_core::enums::LegType;
use dinghy_core::errors::ConfigError;
use dinghy_core::flow::WindField;
use dinghy_core::types::Location;

use crate::classify::{classify, LegThresholds};
use crate::context::{BoatView, SteeringContext, Verdict};
use crate::rounding::{RoundingRule, RoundingStage};
use crate::sailing::SailingRule;

/// Phase of a leg. Moves from `Sailing` to `Rounding` once and never back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Sailing,
    Rounding(RoundingStage),
}

impl Phase {
    pub fn is_rounding(&self) -> bool {
        matches!(self, Phase::Rounding(_))
    }

    /// Switch to rounding. Returns true only on the first call.
    pub fn enter_rounding(&mut self) -> bool {
        if self.is_rounding() {
            return false;
        }
        *self = Phase::Rounding(RoundingStage::Approach);
        true
    }
}

/// Strategy for a boat on one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegStrategy {
    pub leg: Leg,
    pub leg_type: LegType,
    /// Mean wind at the leg's mark when the leg was entered.
    pub mean_wind: Angle,
    pub rounding: RoundingRule,
    pub phase: Phase,
}

/// Strategy for a boat that has rounded the finish mark.
#[derive(Debug, Clone, PartialEq)]
pub struct AfterFinish {
    pub finish: Location,
    stopped: bool,
}

/// The strategy a boat is currently following.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Leg(LegStrategy),
    AfterFinish(AfterFinish),
}

/// Whether a boat at `position` is close enough to the mark to start rounding.
///
/// Distance is measured along the mean wind axis for beats and along its
/// reciprocal otherwise. A mark more than 90 degrees off the axis counts as
/// in range.
pub fn within_rounding_range(
    leg_type: LegType,
    position: &Location,
    mark: &Location,
    mean_wind: Angle,
    metrics: &BoatMetrics,
) -> bool {
    let (axis, threshold) = match leg_type {
        LegType::Windward | LegType::None => {
            (mean_wind, WINDWARD_ROUNDING_LENGTHS * metrics.length)
        }
        LegType::Offwind | LegType::GybingDownwind => {
            (mean_wind.reciprocal(), OFFWIND_ROUNDING_WIDTHS * metrics.width)
        }
    };
    let to_mark = position.vector_to(mark);
    if to_mark.distance == 0.0 {
        return true;
    }
    match to_mark.projection_onto(axis) {
        Some(along) => along <= threshold,
        None => true,
    }
}

impl LegStrategy {
    /// Classify `leg` (and the leg after it) and pick the rounding rule.
    pub fn new(
        leg: &Leg,
        next: Option<&Leg>,
        metrics: &BoatMetrics,
        prefs: &BoatPreferences,
        wind: &dyn WindField,
    ) -> Result<Self, ConfigError> {
        let thresholds = LegThresholds::for_boat(metrics, prefs);
        let mean_wind = leg.mean_wind_bearing(wind);
        let leg_type = classify(&thresholds, leg.bearing(), mean_wind);
        let (next_type, next_bearing) = match next {
            Some(next) => {
                let bearing = next.bearing();
                (
                    classify(&thresholds, bearing, next.mean_wind_bearing(wind)),
                    bearing,
                )
            }
            None => (LegType::None, None),
        };
        let rounding = RoundingRule::new(leg_type, next_type, leg.rounding, next_bearing, metrics)?;
        Ok(Self {
            leg: leg.clone(),
            leg_type,
            mean_wind,
            rounding,
            phase: Phase::Sailing,
        })
    }

    pub fn decide(&mut self, boat: &BoatView) -> Verdict {
        if !self.phase.is_rounding()
            && within_rounding_range(
                self.leg_type,
                &boat.position,
                &self.leg.end,
                self.mean_wind,
                boat.metrics,
            )
            && self.phase.enter_rounding()
        {
            debug!(
                leg = self.leg.index,
                leg_type = %self.leg_type,
                "entering rounding phase"
            );
        }

        let ctx = SteeringContext::new(boat, &self.leg, self.leg_type, self.mean_wind);
        match &mut self.phase {
            Phase::Sailing => match SailingRule::select(self.leg_type, ctx.tack()) {
                Some(rule) => rule.evaluate(&ctx),
                None => Verdict::sail_on("no sailing rule"),
            },
            Phase::Rounding(stage) => self.rounding.evaluate(&ctx, stage),
        }
    }
}

impl AfterFinish {
    pub fn new(finish: Location) -> Self {
        Self {
            finish,
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Sail on until clear of the finish mark, then stop for good.
    pub fn decide(&mut self, boat: &BoatView) -> Verdict {
        if self.stopped {
            return Verdict::new(Decision::stop(), "finished");
        }
        let clear = AFTER_FINISH_STOP_LENGTHS * boat.metrics.length;
        if boat.position.distance_to(&self.finish) > clear {
            self.stopped = true;
            info!(distance = clear, "clear of the finish, stopping");
            return Verdict::new(Decision::stop(), "clear of the finish");
        }
        Verdict::sail_on("clearing the finish")
    }
}

impl Strategy {
    /// Strategy for a boat entering leg `index`, or the after-finish
    /// strategy once `index` runs past the last leg.
    pub fn for_leg(
        course: &Course,
        index: usize,
        metrics: &BoatMetrics,
        prefs: &BoatPreferences,
        wind: &dyn WindField,
    ) -> Result<Self, ConfigError> {
        match course.leg(index) {
            Some(leg) => {
                LegStrategy::new(leg, course.following(leg), metrics, prefs, wind).map(Strategy::Leg)
            }
            None => {
                let last = course.legs().last().ok_or(ConfigError::EmptyCourse)?;
                Ok(Strategy::AfterFinish(AfterFinish::new(last.end)))
            }
        }
    }

    pub fn decide(&mut self, boat: &BoatView) -> Verdict {
        match self {
            Strategy::Leg(leg) => leg.decide(boat),
            Strategy::AfterFinish(after) => after.decide(boat),
        }
    }

    /// Current leg phase, `None` after the finish.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Strategy::Leg(leg) => Some(leg.phase),
            Strategy::AfterFinish(_) => None,
        }
    }

    pub fn leg_type(&self) -> LegType {
        match self {
            Strategy::Leg(leg) => leg.leg_type,
            Strategy::AfterFinish(_) => LegType::None,
        }
    }
}

/// Build every leg's strategy up front so a bad course or boat fails before
/// the race starts rather than at a mark.
pub fn validate_course(
    course: &Course,
    metrics: &BoatMetrics,
    prefs: &BoatPreferences,
    wind: &dyn WindField,
) -> Result<(), ConfigError> {
    metrics.validate()?;
    for index in 0..=course.len() {
        Strategy::for_leg(course, index, metrics, prefs, wind)?;
    }
    Ok(())
}
