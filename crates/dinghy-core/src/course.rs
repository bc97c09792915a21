//! Course model: an ordered chain of legs between marks.
//!
//! A `Course` is built once and shared read-only by every boat's strategy.
//! Legs refer to their successor by position in the chain.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::enums::RoundingSense;
use crate::errors::ConfigError;
use crate::flow::WindField;
use crate::types::{DistanceVector, Location};

/// One leg of the course, ending at a mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Position of this leg in the course.
    pub index: usize,
    pub start: Location,
    /// The mark at the end of the leg.
    pub end: Location,
    /// Side the mark is left on.
    pub rounding: RoundingSense,
}

/// Ordered legs from the start to the finish mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    legs: Vec<Leg>,
}

impl Leg {
    /// Bearing from the start of the leg to its mark. `None` for a zero-length leg.
    pub fn bearing(&self) -> Option<Angle> {
        if self.length() == 0.0 {
            return None;
        }
        Some(self.start.bearing_to(&self.end))
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Straight-line distance from `location` to the mark.
    pub fn distance_to_end(&self, location: &Location) -> f64 {
        location.distance_to(&self.end)
    }

    /// Mean wind bearing around the mark.
    pub fn mean_wind_bearing(&self, wind: &dyn WindField) -> Angle {
        wind.mean_bearing_at(&self.end)
    }

    /// Signed lateral distance of `location` from the rhumb line
    /// (positive = right of the leg direction).
    pub fn cross_track(&self, location: &Location) -> f64 {
        let Some(bearing) = self.bearing() else {
            return 0.0;
        };
        let v = self.start.vector_to(location);
        v.distance * v.angle.signed_diff(bearing).to_radians().sin()
    }

    /// Point beside the mark that a boat arriving on `approach` heading
    /// aims for, so the mark ends up on the rounding side.
    pub fn aim_point(&self, approach: Angle, offset: f64) -> Location {
        let side = approach + self.rounding.passing_side();
        self.end.offset(&DistanceVector::new(offset, side))
    }
}

impl Course {
    /// Build a course from explicit legs. Leg indices are reassigned in order.
    pub fn new(mut legs: Vec<Leg>) -> Result<Self, ConfigError> {
        if legs.is_empty() {
            return Err(ConfigError::EmptyCourse);
        }
        for (index, leg) in legs.iter_mut().enumerate() {
            leg.index = index;
        }
        Ok(Self { legs })
    }

    /// Chain of legs from `start` through each mark in turn.
    pub fn from_marks(
        start: Location,
        marks: &[(Location, RoundingSense)],
    ) -> Result<Self, ConfigError> {
        let mut legs = Vec::with_capacity(marks.len());
        let mut from = start;
        for (index, (mark, rounding)) in marks.iter().enumerate() {
            legs.push(Leg {
                index,
                start: from,
                end: *mark,
                rounding: *rounding,
            });
            from = *mark;
        }
        Self::new(legs)
    }

    /// Windward/leeward course: `laps` beats to a windward mark `length`
    /// meters upwind of `start`, with runs back to a leeward mark at `start`.
    /// All marks are rounded to port; the race finishes at the windward mark.
    pub fn windward_leeward(
        start: Location,
        wind_from: Angle,
        length: f64,
        laps: usize,
    ) -> Result<Self, ConfigError> {
        let windward = start.offset(&DistanceVector::new(length, wind_from));
        let mut marks = Vec::new();
        for lap in 0..laps {
            marks.push((windward, RoundingSense::Port));
            if lap + 1 < laps {
                marks.push((start, RoundingSense::Port));
            }
        }
        Self::from_marks(start, &marks)
    }

    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }

    pub fn leg(&self, index: usize) -> Option<&Leg> {
        self.legs.get(index)
    }

    /// The leg after `leg`, or `None` if it ends at the finish.
    pub fn following(&self, leg: &Leg) -> Option<&Leg> {
        self.legs.get(leg.index + 1)
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}
