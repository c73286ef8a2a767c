//! Common utilities and types for circular path generation

/// Numerical tolerances and limits shared by the parametrizer and the sampler
pub mod tolerances {
    /// Smallest radius accepted as a circle rather than a point (m)
    pub const MIN_RADIUS: f64 = 1e-6;

    /// Smallest norm a normal may have before normalisation
    pub const MIN_NORMAL_NORM: f64 = 1e-9;

    /// Allowed relative mismatch between a supplied radius and the
    /// start-to-center distance
    pub const RADIUS_REL_TOLERANCE: f64 = 1e-3;

    /// Allowed deviation of a policy quaternion's norm from 1
    pub const UNIT_NORM_TOLERANCE: f64 = 1e-6;

    /// Most segments a single sweep may be split into
    pub const MAX_SEGMENTS: usize = 1_000_000;
}

/// Common types used across the crate
pub mod types {
    use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};

    /// An end-effector pose: position plus attitude.
    ///
    /// The frame is whatever frame the downstream planner works in.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Pose {
        pub position: Point3<f64>,
        pub orientation: UnitQuaternion<f64>,
    }

    impl Pose {
        pub fn new(position: Point3<f64>, orientation: UnitQuaternion<f64>) -> Self {
            Pose {
                position,
                orientation,
            }
        }

        /// A pose at `position` with identity orientation
        pub fn from_position(position: Point3<f64>) -> Self {
            Pose::new(position, UnitQuaternion::identity())
        }

        /// Straight-line distance between the positions of two poses
        pub fn distance_to(&self, other: &Pose) -> f64 {
            nalgebra::distance(&self.position, &other.position)
        }
    }

    impl From<Isometry3<f64>> for Pose {
        fn from(iso: Isometry3<f64>) -> Self {
            Pose::new(Point3::from(iso.translation.vector), iso.rotation)
        }
    }

    impl From<Pose> for Isometry3<f64> {
        fn from(pose: Pose) -> Self {
            Isometry3::from_parts(Translation3::from(pose.position.coords), pose.orientation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::types::Pose;
    use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

    #[test]
    fn pose_isometry_conversion_keeps_parts() {
        let rot = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);
        let pose = Pose::new(Point3::new(1.0, -2.0, 0.5), rot);

        let iso: Isometry3<f64> = pose.into();
        assert_eq!(iso.translation.vector, Vector3::new(1.0, -2.0, 0.5));

        let back = Pose::from(iso);
        assert_eq!(back, pose);
    }

    #[test]
    fn distance_ignores_orientation() {
        let a = Pose::from_position(Point3::new(0.0, 0.0, 0.0));
        let b = Pose::new(
            Point3::new(3.0, 4.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.0),
        );
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}
