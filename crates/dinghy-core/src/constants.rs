//! Engine constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 2;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Phase switching ---

/// Windward legs switch to rounding within this many boat lengths of the mark,
/// measured along the wind axis.
pub const WINDWARD_ROUNDING_LENGTHS: f64 = 5.0;

/// Offwind and gybing legs switch to rounding within this many boat widths,
/// measured along the reciprocal wind axis.
pub const OFFWIND_ROUNDING_WIDTHS: f64 = 20.0;

/// After finishing, a boat stops once this many boat lengths past the last mark.
pub const AFTER_FINISH_STOP_LENGTHS: f64 = 5.0;

// --- Aim points ---

/// Distance of the aim point from the mark, in boat lengths.
pub const MARK_OFFSET_LENGTHS: f64 = 1.5;

// --- Steering ---

/// Heading error (degrees) below which no course correction is issued.
pub const COURSE_TOLERANCE: f64 = 0.5;

/// The rounding trigger also fires when the mark lies up to this many degrees
/// past dead astern, on the side away from the rounding.
pub const ROUNDING_ASTERN_TOLERANCE: f64 = 10.0;

/// Largest single turn a rounding issues before the terminal maneuver (degrees).
pub const MAX_ROUNDING_STEP: f64 = 90.0;

/// Channel rules only apply while the boat is farther than this many
/// channel half-widths from the mark.
pub const CHANNEL_RELEASE_WIDTHS: f64 = 1.0;

// --- Kinematics ---

/// Turn rate factor applied below the boat's low-speed threshold.
pub const LOW_SPEED_TURN_FACTOR: f64 = 0.5;

// --- Fleet setup ---

/// Default spread of the starting fleet (meters, each side of the start).
pub const START_SPREAD: f64 = 40.0;

/// Maximum random distance (meters) boats are staggered behind the start.
pub const START_STAGGER: f64 = 10.0;
