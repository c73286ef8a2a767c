//! Errors reported while building a circular path

use thiserror::Error;

/// An error raised by the parametrizer or the sampler.
///
/// All variants are input validation failures; no waypoints are produced
/// when one is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CircleError {
    #[error("Circle geometry is inconsistent: {0}")]
    GeometryInconsistent(String),

    #[error("Circle radius {radius} is too small, the circle degenerates to a point")]
    DegenerateCircle { radius: f64 },

    #[error("Maximum linear step {step} is out of range for a circle of diameter {diameter}")]
    InvalidStepSize { step: f64, diameter: f64 },

    #[error("Number of revolutions {0} is not positive or needs too many waypoints")]
    InvalidRevolutions(f64),

    #[error("Orientation at angle {theta} rad is not a unit quaternion (norm {norm})")]
    InvalidOrientation { theta: f64, norm: f64 },
}
