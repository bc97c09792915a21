//! The steering decision handed from the tactics layer to the integrator.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::enums::{Action, TurnSense};

/// One tick's steering order for one boat.
///
/// `target` and `sense` only mean something for `Turn` and `MarkRounding`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub target: Angle,
    pub sense: TurnSense,
}

impl Decision {
    pub fn sail_on() -> Self {
        Self::default()
    }

    pub fn stop() -> Self {
        Self {
            action: Action::Stop,
            ..Self::default()
        }
    }

    pub fn turn(target: Angle, sense: TurnSense) -> Self {
        Self {
            action: Action::Turn,
            target,
            sense,
        }
    }

    /// Turn that takes the shorter way round.
    pub fn turn_shortest(heading: Angle, target: Angle) -> Self {
        Self::turn(target, TurnSense::shortest(heading, target))
    }

    pub fn mark_rounding(target: Angle, sense: TurnSense) -> Self {
        Self {
            action: Action::MarkRounding,
            target,
            sense,
        }
    }

    /// Back to sailing straight on.
    pub fn reset(&mut self) {
        *self = Self::sail_on();
    }

    /// Whether this decision changes heading.
    pub fn is_turning(&self) -> bool {
        matches!(self.action, Action::Turn | Action::MarkRounding)
    }
}
