//! Boat-class metrics, the performance polar, and per-boat sailing preferences.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Boat speed table indexed by true wind angle and true wind speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    /// True wind angles (degrees off the bow, ascending within [0, 180]).
    wind_angles: Vec<f64>,
    /// True wind speeds (m/s, ascending).
    wind_speeds: Vec<f64>,
    /// Boat speeds in m/s: `speeds[angle_idx][speed_idx]`.
    speeds: Vec<Vec<f64>>,
}

/// Per-class constants shared by every boat of the class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatMetrics {
    /// Hull length (m).
    pub length: f64,
    /// Hull width (m).
    pub width: f64,
    /// Maximum rate of turn (degrees per second).
    pub max_turn_rate: f64,
    /// Close-hauled angle off the wind (degrees). Legs within it are windward.
    pub upwind_relative: f64,
    /// Gybing angle off the wind (degrees). Deeper legs are sailed on gybes.
    pub downwind_relative: f64,
    /// Below this speed (m/s) the rudder loses authority.
    pub low_speed_threshold: f64,
    /// Fraction of the gap to potential speed closed each tick, in (0, 1].
    pub inertia: f64,
    pub polar: Polar,
}

/// Lateral limit either side of the rhumb line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Half-width of the channel (m).
    pub half_width: f64,
}

/// How a particular boat likes to sail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatPreferences {
    pub sail_on_best_tack: bool,
    pub sail_on_best_gybe: bool,
    pub tack_if_headed: bool,
    pub gybe_if_headed: bool,
    pub bear_away_if_headed: bool,
    pub luff_up_if_lifted: bool,
    /// Sail deep downwind legs as a series of gybes.
    pub reach_downwind: bool,
    pub channel: Option<Channel>,
}

impl Polar {
    pub fn new(
        wind_angles: Vec<f64>,
        wind_speeds: Vec<f64>,
        speeds: Vec<Vec<f64>>,
    ) -> Result<Self, ConfigError> {
        let polar = Self {
            wind_angles,
            wind_speeds,
            speeds,
        };
        polar.validate()?;
        Ok(polar)
    }

    /// Generic two-person dinghy.
    pub fn dinghy() -> Self {
        Self {
            wind_angles: vec![0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 150.0, 180.0],
            wind_speeds: vec![2.0, 4.0, 6.0, 8.0, 10.0],
            speeds: vec![
                vec![0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.4, 0.8, 1.0, 1.1, 1.2],
                vec![1.2, 2.0, 2.5, 2.8, 3.0],
                vec![1.4, 2.3, 2.9, 3.2, 3.4],
                vec![1.6, 2.6, 3.3, 3.7, 4.0],
                vec![1.5, 2.5, 3.2, 3.7, 4.1],
                vec![1.3, 2.2, 2.9, 3.4, 3.8],
                vec![1.1, 1.9, 2.5, 3.0, 3.4],
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wind_angles.is_empty() || self.wind_speeds.is_empty() {
            return Err(ConfigError::InvalidPolar("empty table".into()));
        }
        if !is_ascending(&self.wind_angles) || !is_ascending(&self.wind_speeds) {
            return Err(ConfigError::InvalidPolar("axes must be strictly ascending".into()));
        }
        if self.speeds.len() != self.wind_angles.len()
            || self.speeds.iter().any(|row| row.len() != self.wind_speeds.len())
        {
            return Err(ConfigError::InvalidPolar(format!(
                "table must be {}x{}",
                self.wind_angles.len(),
                self.wind_speeds.len()
            )));
        }
        if self.speeds.iter().flatten().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ConfigError::InvalidPolar("speeds must be finite and >= 0".into()));
        }
        Ok(())
    }

    /// Bilinear interpolation of boat speed (m/s) for a true wind angle
    /// (degrees, folded into [0, 180]) and true wind speed (m/s).
    /// Inputs outside the table are clamped to its edges.
    pub fn boat_speed(&self, wind_angle: f64, wind_speed: f64) -> f64 {
        if self.wind_angles.is_empty() || self.wind_speeds.is_empty() {
            return 0.0;
        }
        if !wind_angle.is_finite() || !wind_speed.is_finite() {
            return 0.0;
        }
        let angle = wind_angle.abs().min(180.0);
        let (a0, a1, ta) = bracket(&self.wind_angles, angle);
        let (s0, s1, ts) = bracket(&self.wind_speeds, wind_speed);

        let lower = self.speeds[a0][s0] * (1.0 - ts) + self.speeds[a0][s1] * ts;
        let upper = self.speeds[a1][s0] * (1.0 - ts) + self.speeds[a1][s1] * ts;
        lower * (1.0 - ta) + upper * ta
    }
}

/// Indices of the axis entries around `value` and the fraction between them.
fn bracket(axis: &[f64], value: f64) -> (usize, usize, f64) {
    let last = axis.len() - 1;
    if value <= axis[0] {
        return (0, 0, 0.0);
    }
    if value >= axis[last] {
        return (last, last, 0.0);
    }
    let hi = axis.partition_point(|&x| x <= value).min(last);
    let lo = hi - 1;
    let t = (value - axis[lo]) / (axis[hi] - axis[lo]);
    (lo, hi, t)
}

fn is_ascending(axis: &[f64]) -> bool {
    axis.iter().all(|v| v.is_finite()) && axis.windows(2).all(|w| w[0] < w[1])
}

impl BoatMetrics {
    /// Generic two-person dinghy class.
    pub fn dinghy() -> Self {
        Self {
            length: 4.2,
            width: 1.6,
            max_turn_rate: 30.0,
            upwind_relative: 45.0,
            downwind_relative: 140.0,
            low_speed_threshold: 0.5,
            inertia: 0.2,
            polar: Polar::dinghy(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("length", self.length),
            ("width", self.width),
            ("max_turn_rate", self.max_turn_rate),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidMetrics(format!("{name} must be > 0")));
            }
        }
        if !(self.upwind_relative > 0.0 && self.upwind_relative < self.downwind_relative)
            || self.downwind_relative > 180.0
        {
            return Err(ConfigError::InvalidMetrics(
                "need 0 < upwind_relative < downwind_relative <= 180".into(),
            ));
        }
        if !(self.inertia > 0.0 && self.inertia <= 1.0) {
            return Err(ConfigError::InvalidMetrics("inertia must be in (0, 1]".into()));
        }
        if !(self.low_speed_threshold >= 0.0) {
            return Err(ConfigError::InvalidMetrics(
                "low_speed_threshold must be >= 0".into(),
            ));
        }
        self.polar.validate()
    }

    /// Heading change allowed in one tick at the given boat speed.
    pub fn turn_limit(&self, speed: f64, dt: f64) -> f64 {
        let rate = self.max_turn_rate * dt;
        if speed < self.low_speed_threshold {
            rate * crate::constants::LOW_SPEED_TURN_FACTOR
        } else {
            rate
        }
    }
}

impl BoatPreferences {
    /// A tactically minded helm: plays shifts both ways and gybes downwind.
    pub fn racer() -> Self {
        Self {
            sail_on_best_tack: true,
            sail_on_best_gybe: true,
            tack_if_headed: false,
            gybe_if_headed: false,
            bear_away_if_headed: true,
            luff_up_if_lifted: true,
            reach_downwind: true,
            channel: None,
        }
    }
}
