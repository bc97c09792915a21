//! Enumeration types used throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// Which side of the boat the wind comes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tack {
    Port,
    Starboard,
}

/// Side on which a mark is left when the boat rounds it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingSense {
    /// Mark kept on the port hand; the boat turns counter-clockwise.
    #[default]
    Port,
    /// Mark kept on the starboard hand; the boat turns clockwise.
    Starboard,
}

/// Direction of rotation for a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnSense {
    /// Counter-clockwise (turning left).
    Port,
    /// Clockwise (turning right).
    #[default]
    Starboard,
}

/// Classification of a leg relative to the mean wind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegType {
    /// Within the upwind-relative angle of the wind: beat on close-hauled tacks.
    Windward,
    /// Reachable on a single course.
    Offwind,
    /// Deep downwind leg sailed on alternating gybes.
    GybingDownwind,
    /// No leg (past the last mark) or a leg without a defined bearing.
    #[default]
    None,
}

/// What the boat should do this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[default]
    SailOn,
    Turn,
    MarkRounding,
    Stop,
}

impl Tack {
    /// Tack for a heading in a wind blowing from `wind`.
    /// Wind on the starboard side (clockwise of the heading) is starboard tack;
    /// head-to-wind counts as port.
    pub fn of(heading: Angle, wind: Angle) -> Self {
        if wind.signed_diff(heading) > 0.0 {
            Tack::Starboard
        } else {
            Tack::Port
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Tack::Port => Tack::Starboard,
            Tack::Starboard => Tack::Port,
        }
    }

    /// Heading on this tack that sails `off_wind` degrees from the wind.
    pub fn course(self, wind: Angle, off_wind: f64) -> Angle {
        match self {
            Tack::Starboard => wind - off_wind,
            Tack::Port => wind + off_wind,
        }
    }
}

impl RoundingSense {
    /// Rotation direction used when turning around the mark.
    pub fn turn(self) -> TurnSense {
        match self {
            RoundingSense::Port => TurnSense::Port,
            RoundingSense::Starboard => TurnSense::Starboard,
        }
    }

    /// Offset from the approach heading towards the side the boat passes on.
    pub fn passing_side(self) -> f64 {
        match self {
            RoundingSense::Port => 90.0,
            RoundingSense::Starboard => -90.0,
        }
    }
}

impl TurnSense {
    /// Direction of the shorter rotation from `from` to `to`.
    /// Exactly opposite headings resolve clockwise.
    pub fn shortest(from: Angle, to: Angle) -> Self {
        if to.signed_diff(from) >= 0.0 {
            TurnSense::Starboard
        } else {
            TurnSense::Port
        }
    }

    /// Rotation from `from` to `to` when turning in this sense, in [0, 360).
    pub fn rotation(self, from: Angle, to: Angle) -> f64 {
        match self {
            TurnSense::Starboard => from.clockwise_to(to),
            TurnSense::Port => from.counterclockwise_to(to),
        }
    }

    /// Heading reached by rotating `degrees` from `from` in this sense.
    pub fn rotate(self, from: Angle, degrees: f64) -> Angle {
        match self {
            TurnSense::Starboard => from + degrees,
            TurnSense::Port => from - degrees,
        }
    }
}

impl fmt::Display for LegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LegType::Windward => "windward",
            LegType::Offwind => "offwind",
            LegType::GybingDownwind => "gybing-downwind",
            LegType::None => "none",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RoundingSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingSense::Port => f.write_str("port"),
            RoundingSense::Starboard => f.write_str("starboard"),
        }
    }
}
