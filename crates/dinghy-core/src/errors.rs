//! Configuration errors raised before a race starts.

use thiserror::Error;

use crate::enums::{LegType, RoundingSense};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unsupported leg-type transition: {this_leg} -> {next_leg} rounding to {rounding}")]
    UnsupportedTransition {
        this_leg: LegType,
        next_leg: LegType,
        rounding: RoundingSense,
    },

    #[error("course has no legs")]
    EmptyCourse,

    #[error("invalid performance polar: {0}")]
    InvalidPolar(String),

    #[error("invalid boat metrics: {0}")]
    InvalidMetrics(String),
}
