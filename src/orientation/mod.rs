//! Orientation policies applied along a circular path

use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};
use std::fmt::Debug;

/// Everything a policy may need to know about the waypoint being built
#[derive(Debug, Clone, Copy)]
pub struct OrientationQuery {
    /// Absolute angle of the waypoint around the circle
    pub theta: f64,
    /// Signed angle travelled since the start pose
    pub delta: f64,
    /// Fraction of the sweep completed, in [0, 1]
    pub progress: f64,
    /// Circle normal the angles are measured about
    pub normal: Unit<Vector3<f64>>,
    /// Orientation of the start pose
    pub start_orientation: UnitQuaternion<f64>,
}

/// Trait for end-effector orientation rules
pub trait OrientationPolicy: Debug + Send + Sync {
    /// Orientation of the waypoint described by `query`.
    ///
    /// The result must be a unit quaternion; the sampler rejects anything
    /// else.
    fn orientation_at(&self, query: &OrientationQuery) -> Quaternion<f64>;

    /// Get the name of this policy
    fn name(&self) -> &str;
}

pub mod constant;
pub mod interpolated;
pub mod slerp;
pub mod tangent;

pub use constant::ConstantOrientation;
pub use interpolated::InterpolatedOrientation;
pub use slerp::SlerpOrientation;
pub use tangent::TangentFollowing;

// Default implementation
pub use constant::ConstantOrientation as DefaultOrientation;
