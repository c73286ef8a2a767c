//! Hand-off of circle waypoints to a Cartesian path planner
//!
//! The planner itself (e.g. a MoveIt! move group) lives outside this crate and
//! is reached through [`CartesianPathPlanner`].

use crate::circle::CircleSpec;
use crate::common::types::Pose;
use crate::error::CircleError;
use crate::orientation::OrientationPolicy;
use crate::sampler::Discretization;
use log::{info, warn};
use thiserror::Error;

/// Errors raised while planning or executing a circular motion
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("Invalid motion request: {0}")]
    InvalidRequest(String),

    #[error("Could not generate the circle waypoints: {0}")]
    Generation(#[from] CircleError),

    #[error("Cartesian planning failed: {0}")]
    Planner(String),

    #[error("Trajectory execution failed: {0}")]
    Execution(String),
}

/// Result of a Cartesian planning call
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianPlan<T> {
    pub trajectory: T,
    /// Fraction of the waypoint path the planner managed to follow, in [0, 1]
    pub fraction: f64,
}

/// Trait for Cartesian path planners/executors
pub trait CartesianPathPlanner {
    /// Planned trajectory type
    type Trajectory;

    /// Scale the maximum joint velocities used for planning
    fn set_max_velocity_scaling_factor(&mut self, factor: f64) -> Result<(), PlanningError>;

    /// Plan a path through `waypoints`, interpolating at `eef_step` metres
    fn compute_cartesian_path(
        &mut self,
        waypoints: &[Pose],
        eef_step: f64,
        jump_threshold: f64,
    ) -> Result<CartesianPlan<Self::Trajectory>, PlanningError>;

    /// Execute a planned trajectory, blocking until it finishes
    fn execute(&mut self, trajectory: &Self::Trajectory) -> Result<(), PlanningError>;
}

/// A request to plan (and possibly execute) a circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMotion {
    pub start: Pose,
    pub spec: CircleSpec,
    pub discretization: Discretization,
    /// Interpolation resolution handed to the planner (m)
    pub eef_step: f64,
    /// Joint-space jump threshold, 0 disables the check
    pub jump_threshold: f64,
    /// Velocity scaling factor in (0, 1]
    pub velocity_scale: f64,
    /// Execute the trajectory if it is complete enough
    pub execute: bool,
    /// Minimum planned fraction required for execution
    pub completeness_threshold: f64,
}

impl CircleMotion {
    pub fn new(start: Pose, spec: CircleSpec, discretization: Discretization) -> Self {
        CircleMotion {
            start,
            spec,
            discretization,
            eef_step: 0.005,
            jump_threshold: 0.0,
            velocity_scale: 0.2,
            execute: true,
            completeness_threshold: 0.95,
        }
    }

    fn validate(&self) -> Result<(), PlanningError> {
        if !(self.eef_step.is_finite() && self.eef_step > 0.0) {
            return Err(PlanningError::InvalidRequest(format!(
                "eef_step must be positive, found {}",
                self.eef_step
            )));
        }
        if !(self.jump_threshold.is_finite() && self.jump_threshold >= 0.0) {
            return Err(PlanningError::InvalidRequest(format!(
                "jump_threshold must be non-negative, found {}",
                self.jump_threshold
            )));
        }
        if !(self.velocity_scale > 0.0 && self.velocity_scale <= 1.0) {
            return Err(PlanningError::InvalidRequest(format!(
                "velocity_scale must be in (0, 1], found {}",
                self.velocity_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.completeness_threshold) {
            return Err(PlanningError::InvalidRequest(format!(
                "completeness_threshold must be in [0, 1], found {}",
                self.completeness_threshold
            )));
        }
        Ok(())
    }
}

/// Outcome of [`plan_cartesian_circle`]
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMotionOutcome<T> {
    pub plan: CartesianPlan<T>,
    /// Number of waypoints handed to the planner
    pub waypoint_count: usize,
    pub executed: bool,
}

/// Plan a circle and execute it when the planner covered enough of it.
///
/// Execution only happens when `motion.execute` is set and the planned
/// fraction reaches `motion.completeness_threshold`.
pub fn plan_cartesian_circle<P: CartesianPathPlanner>(
    planner: &mut P,
    motion: &CircleMotion,
    policy: &dyn OrientationPolicy,
) -> Result<CircleMotionOutcome<P::Trajectory>, PlanningError> {
    motion.validate()?;

    if motion.discretization.max_linear_step > motion.eef_step {
        warn!(
            "Waypoint step {} m is larger than the planner step {} m, planning may stop early",
            motion.discretization.max_linear_step, motion.eef_step
        );
    }

    planner.set_max_velocity_scaling_factor(motion.velocity_scale)?;

    let waypoints = crate::generate(&motion.start, &motion.spec, &motion.discretization, policy)?;

    let plan = planner.compute_cartesian_path(&waypoints, motion.eef_step, motion.jump_threshold)?;
    if !(0.0..=1.0).contains(&plan.fraction) {
        return Err(PlanningError::Planner(format!(
            "planner reported an invalid fraction {}",
            plan.fraction
        )));
    }

    info!(
        "Planned {:.1}% of a {} waypoint circle",
        plan.fraction * 100.0,
        waypoints.len()
    );

    let executed = if motion.execute && plan.fraction >= motion.completeness_threshold {
        planner.execute(&plan.trajectory)?;
        true
    } else {
        if motion.execute {
            warn!(
                "Not executing, planned fraction {:.3} is below the threshold {:.3}",
                plan.fraction, motion.completeness_threshold
            );
        }
        false
    };

    Ok(CircleMotionOutcome {
        plan,
        waypoint_count: waypoints.len(),
        executed,
    })
}
