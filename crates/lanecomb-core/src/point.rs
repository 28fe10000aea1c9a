//! Envelope point data model.

use serde::{Deserialize, Serialize};

/// Segment shape of an envelope point.
///
/// The shape describes how the curve travels from this point to the next.
/// Hosts know more shapes than the cleanup engine cares about; the engine
/// only ever asks whether a point is [`Square`](PointShape::Square) - a step
/// that holds its value until the next point, then jumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointShape {
    /// Straight line to the next point
    #[default]
    Linear,
    /// Hold value, then jump (step)
    Square,
    /// Slow start and end
    SlowStartEnd,
    /// Fast start
    FastStart,
    /// Fast end
    FastEnd,
    /// Bezier with a per-point tension
    Bezier,
}

impl PointShape {
    /// Build from the host's raw shape integer. Unknown values fall back to
    /// [`Linear`](PointShape::Linear).
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Square,
            2 => Self::SlowStartEnd,
            3 => Self::FastStart,
            4 => Self::FastEnd,
            5 => Self::Bezier,
            _ => Self::Linear,
        }
    }

    /// The host's raw shape integer.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Linear => 0,
            Self::Square => 1,
            Self::SlowStartEnd => 2,
            Self::FastStart => 3,
            Self::FastEnd => 4,
            Self::Bezier => 5,
        }
    }

    /// Whether this is the step shape.
    pub fn is_square(self) -> bool {
        matches!(self, Self::Square)
    }
}

/// One automation point: a (time, value, shape) triple on a lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    /// Position on the lane, in host time units
    pub time: f64,
    /// Parameter amplitude at that position
    pub value: f64,
    /// Segment shape toward the next point
    pub shape: PointShape,
}

impl EnvelopePoint {
    /// Create a linear point.
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            shape: PointShape::Linear,
        }
    }

    /// Create a point with an explicit shape.
    pub fn with_shape(time: f64, value: f64, shape: PointShape) -> Self {
        Self { time, value, shape }
    }
}
