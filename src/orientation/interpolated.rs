//! Caller supplied orientation function

use super::{OrientationPolicy, OrientationQuery};
use nalgebra::{Quaternion, UnitQuaternion};
use std::fmt;

/// Wraps a function `(theta, start_orientation) -> orientation`.
///
/// The function's result is used verbatim.
pub struct InterpolatedOrientation<F> {
    interpolate: F,
}

impl<F> InterpolatedOrientation<F>
where
    F: Fn(f64, &UnitQuaternion<f64>) -> Quaternion<f64> + Send + Sync,
{
    pub fn new(interpolate: F) -> Self {
        InterpolatedOrientation { interpolate }
    }
}

impl<F> fmt::Debug for InterpolatedOrientation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolatedOrientation").finish_non_exhaustive()
    }
}

impl<F> OrientationPolicy for InterpolatedOrientation<F>
where
    F: Fn(f64, &UnitQuaternion<f64>) -> Quaternion<f64> + Send + Sync,
{
    fn orientation_at(&self, query: &OrientationQuery) -> Quaternion<f64> {
        (self.interpolate)(query.theta, &query.start_orientation)
    }

    fn name(&self) -> &str {
        "InterpolatedOrientation"
    }
}
