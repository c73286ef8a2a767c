pub mod circle;
pub mod common;
pub mod config;
pub mod error;
pub mod logger;
pub mod orientation;
pub mod planner;
pub mod sampler;

pub use crate::circle::{parametrize, Circle, CircleSpec, ParametrizedCircle, Plane};
pub use crate::common::types::Pose;
pub use crate::error::CircleError;
pub use crate::sampler::{sample, Direction, Discretization};

use crate::orientation::{DefaultOrientation, OrientationPolicy};

/// Parametrize the circle through `start` and sample its waypoints
pub fn generate(
    start: &Pose,
    spec: &CircleSpec,
    discretization: &Discretization,
    policy: &dyn OrientationPolicy,
) -> Result<Vec<Pose>, CircleError> {
    let circle = parametrize(start, spec)?;
    sample(&circle, discretization, policy)
}

/// Circular waypoint generator with a fixed discretization and orientation
/// policy
#[derive(Debug)]
pub struct CircleGenerator {
    discretization: Discretization,
    policy: Box<dyn OrientationPolicy>,
}

impl CircleGenerator {
    /// Create a generator keeping the start orientation
    pub fn new(discretization: Discretization) -> Self {
        CircleGenerator {
            discretization,
            policy: Box::new(DefaultOrientation::default()),
        }
    }

    /// Create a generator with a specific orientation policy
    pub fn with_policy<T: OrientationPolicy + 'static>(discretization: Discretization, policy: T) -> Self {
        CircleGenerator {
            discretization,
            policy: Box::new(policy),
        }
    }

    /// Set the orientation policy
    pub fn set_policy<T: OrientationPolicy + 'static>(&mut self, policy: T) {
        self.policy = Box::new(policy);
    }

    pub fn discretization(&self) -> &Discretization {
        &self.discretization
    }

    /// Get the name of the current orientation policy
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Generate the waypoints of the circle described by `spec` through `start`
    pub fn generate(&self, start: &Pose, spec: &CircleSpec) -> Result<Vec<Pose>, CircleError> {
        generate(start, spec, &self.discretization, self.policy.as_ref())
    }
}
