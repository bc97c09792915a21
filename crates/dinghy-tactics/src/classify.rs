//! Leg classification relative to the mean wind.

use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::enums::LegType;

/// The boat-specific angles that separate leg types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegThresholds {
    /// Close-hauled angle off the wind (degrees).
    pub upwind: f64,
    /// Gybing angle off the wind (degrees).
    pub downwind: f64,
    /// Whether deep legs are sailed as gybing legs at all.
    pub reach_downwind: bool,
}

impl LegThresholds {
    pub fn for_boat(metrics: &BoatMetrics, prefs: &BoatPreferences) -> Self {
        Self {
            upwind: metrics.upwind_relative,
            downwind: metrics.downwind_relative,
            reach_downwind: prefs.reach_downwind,
        }
    }
}

/// Classify a leg from its bearing and the mean wind bearing.
///
/// `None` for the bearing (no leg, or a zero-length leg) classifies as
/// `LegType::None`. Both threshold boundaries are inclusive.
pub fn classify(thresholds: &LegThresholds, leg_bearing: Option<Angle>, mean_wind: Angle) -> LegType {
    let Some(bearing) = leg_bearing else {
        return LegType::None;
    };
    let delta = bearing.abs_diff(mean_wind);
    if delta <= thresholds.upwind {
        LegType::Windward
    } else if thresholds.reach_downwind && delta >= thresholds.downwind {
        LegType::GybingDownwind
    } else {
        LegType::Offwind
    }
}
