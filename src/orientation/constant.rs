//! Constant orientation policy

use super::{OrientationPolicy, OrientationQuery};
use nalgebra::Quaternion;

/// Keeps the start orientation at every waypoint
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantOrientation;

impl OrientationPolicy for ConstantOrientation {
    fn orientation_at(&self, query: &OrientationQuery) -> Quaternion<f64> {
        query.start_orientation.into_inner()
    }

    fn name(&self) -> &str {
        "ConstantOrientation"
    }
}
