//! Tangent-following orientation policy

use super::{OrientationPolicy, OrientationQuery};
use nalgebra::{Quaternion, UnitQuaternion};

/// Rotates the start orientation about the circle normal by the angle
/// travelled so far.
///
/// The rotation is applied in the world frame, the same way positions are
/// swept, so the attitude of the end-effector relative to the path tangent
/// stays fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TangentFollowing;

impl OrientationPolicy for TangentFollowing {
    fn orientation_at(&self, query: &OrientationQuery) -> Quaternion<f64> {
        let sweep = UnitQuaternion::from_axis_angle(&query.normal, query.delta);
        (sweep * query.start_orientation).into_inner()
    }

    fn name(&self) -> &str {
        "TangentFollowing"
    }
}
