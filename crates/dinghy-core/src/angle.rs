//! Circular angle arithmetic for compass bearings.
//!
//! Every `Angle` lives in [0, 360). Ordering between angles is circular:
//! `a.gt(b)` holds when `a` lies clockwise of `b` along the shorter arc.
//! The derived `PartialEq` compares raw normalized degrees.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

const FULL_TURN: f64 = 360.0;
const HALF_TURN: f64 = 180.0;

/// Compass angle in degrees. 0 = North, growing clockwise (90 = East).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Angle(f64);

/// Fold any finite value into [0, 360). Non-finite input maps to 0.
fn normalize(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let folded = degrees.rem_euclid(FULL_TURN);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if folded >= FULL_TURN {
        0.0
    } else {
        folded
    }
}

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn new(degrees: f64) -> Self {
        Self(normalize(degrees))
    }

    pub fn from_radians(radians: f64) -> Self {
        Self::new(radians.to_degrees())
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Signed shortest-path difference `self - other`, in (-180, 180].
    /// Positive when `self` lies clockwise of `other`.
    pub fn signed_diff(self, other: Angle) -> f64 {
        let d = normalize(self.0 - other.0);
        if d > HALF_TURN {
            d - FULL_TURN
        } else {
            d
        }
    }

    /// Absolute shortest-path separation, in [0, 180].
    pub fn abs_diff(self, other: Angle) -> f64 {
        self.signed_diff(other).abs()
    }

    /// Rotation needed to reach `target` turning clockwise, in [0, 360).
    pub fn clockwise_to(self, target: Angle) -> f64 {
        normalize(target.0 - self.0)
    }

    /// Rotation needed to reach `target` turning counter-clockwise, in [0, 360).
    pub fn counterclockwise_to(self, target: Angle) -> f64 {
        normalize(self.0 - target.0)
    }

    /// Circular "greater than": `self` is clockwise of `other`.
    ///
    /// Exactly opposite angles are ordered by their raw degrees so that
    /// `a.gt(b)` and `b.gt(a)` never both hold.
    pub fn gt(self, other: Angle) -> bool {
        let d = self.signed_diff(other);
        if d == HALF_TURN {
            self.0 > other.0
        } else {
            d > 0.0
        }
    }

    pub fn gteq(self, other: Angle) -> bool {
        self == other || self.gt(other)
    }

    pub fn lt(self, other: Angle) -> bool {
        other.gt(self)
    }

    pub fn lteq(self, other: Angle) -> bool {
        !self.gt(other)
    }

    /// The opposite direction.
    pub fn reciprocal(self) -> Self {
        self + HALF_TURN
    }

    /// Whether `self` lies on the clockwise arc from `from` to `to`, inclusive.
    pub fn is_within(self, from: Angle, to: Angle) -> bool {
        from.clockwise_to(self) <= from.clockwise_to(to)
    }
}

impl From<f64> for Angle {
    fn from(degrees: f64) -> Self {
        Angle::new(degrees)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}

impl Add<f64> for Angle {
    type Output = Angle;

    fn add(self, degrees: f64) -> Angle {
        Angle::new(self.0 + degrees)
    }
}

impl Sub<f64> for Angle {
    type Output = Angle;

    fn sub(self, degrees: f64) -> Angle {
        Angle::new(self.0 - degrees)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, other: Angle) -> Angle {
        Angle::new(self.0 + other.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, other: Angle) -> Angle {
        Angle::new(self.0 - other.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, factor: f64) -> Angle {
        Angle::new(self.0 * factor)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::new(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}
