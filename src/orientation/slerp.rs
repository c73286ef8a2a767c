//! Orientation blended towards a target over the sweep

use super::{OrientationPolicy, OrientationQuery};
use nalgebra::{Quaternion, UnitQuaternion};

/// Spherically interpolates from the start orientation to `target`, reaching
/// it on the last waypoint.
#[derive(Debug, Clone, Copy)]
pub struct SlerpOrientation {
    target: UnitQuaternion<f64>,
}

impl SlerpOrientation {
    pub fn new(target: UnitQuaternion<f64>) -> Self {
        SlerpOrientation { target }
    }
}

impl OrientationPolicy for SlerpOrientation {
    fn orientation_at(&self, query: &OrientationQuery) -> Quaternion<f64> {
        // try_slerp gives up on rotations half a turn apart, powf still picks an axis
        query
            .start_orientation
            .try_slerp(&self.target, query.progress, 1e-9)
            .unwrap_or_else(|| {
                let partial = (self.target * query.start_orientation.inverse()).powf(query.progress);
                partial * query.start_orientation
            })
            .into_inner()
    }

    fn name(&self) -> &str {
        "SlerpOrientation"
    }
}
