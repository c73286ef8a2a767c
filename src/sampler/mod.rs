//! Waypoint sampling around a parametrized circle
//!
//! The sampler walks the circle in equal angular increments no larger than
//! the increment whose chord equals the maximum linear step, so consecutive
//! waypoints are never further apart than the downstream Cartesian planner
//! allows.
pub mod discretization;

pub use self::discretization::{Direction, Discretization};

use crate::circle::ParametrizedCircle;
use crate::common::tolerances::{MAX_SEGMENTS, UNIT_NORM_TOLERANCE};
use crate::common::types::Pose;
use crate::error::CircleError;
use crate::orientation::{OrientationPolicy, OrientationQuery};
use log::{debug, trace, warn};
use nalgebra::UnitQuaternion;
use std::f64::consts::TAU;

/// Sample the waypoints of `circle` according to `discretization`.
///
/// The first waypoint is the start pose; for a whole number of revolutions
/// the last one repeats its position. Nothing is returned unless every
/// waypoint could be built.
pub fn sample(
    circle: &ParametrizedCircle,
    discretization: &Discretization,
    policy: &dyn OrientationPolicy,
) -> Result<Vec<Pose>, CircleError> {
    let ParametrizedCircle {
        circle,
        start_angle,
        start,
    } = *circle;

    let segments = segment_count(circle.radius(), discretization)?;
    let sweep = discretization.revolutions * TAU;
    let increment = sweep / segments as f64;
    let sign = discretization.direction.sign();
    let closed = discretization.is_closed();

    debug!(
        "Sampling {} segments of {:.6} rad ({:?}, {} revolutions, {})",
        segments,
        increment,
        discretization.direction,
        discretization.revolutions,
        policy.name()
    );

    let mut waypoints: Vec<Pose> = Vec::with_capacity(segments + 1);

    for i in 0..=segments {
        // Land the last waypoint exactly on the closing angle
        let travelled = if i == segments {
            sweep
        } else {
            i as f64 * increment
        };
        let delta = sign * travelled;
        let theta = start_angle + delta;

        // The loop starts and, when closed, ends on the start pose itself
        let position = if i == 0 || (closed && i == segments) {
            start.position
        } else {
            circle.point_at(theta)
        };

        let query = OrientationQuery {
            theta,
            delta,
            progress: travelled / sweep,
            normal: circle.normal(),
            start_orientation: start.orientation,
        };
        let orientation = policy.orientation_at(&query);

        let norm = orientation.norm();
        if !norm.is_finite() || (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
            return Err(CircleError::InvalidOrientation { theta, norm });
        }

        trace!("Waypoint {}: theta={:.6}, position={:?}", i, theta, position.coords.as_slice());

        waypoints.push(Pose::new(position, UnitQuaternion::new_unchecked(orientation)));
    }

    Ok(waypoints)
}

/// Largest angular increment whose chord does not exceed `max_linear_step`
pub fn max_angular_increment(radius: f64, max_linear_step: f64) -> f64 {
    2.0 * (max_linear_step / (2.0 * radius)).asin()
}

/// Number of segments the sweep is split into.
///
/// Validates the step size against the circle diameter and the number of
/// revolutions. A step so small that one revolution needs more than
/// `MAX_SEGMENTS` segments is an invalid step; a sweep needing more is an
/// invalid number of revolutions.
/// A waypoint count override above `MAX_SEGMENTS` is capped.
pub fn segment_count(radius: f64, discretization: &Discretization) -> Result<usize, CircleError> {
    let step = discretization.max_linear_step;
    let diameter = 2.0 * radius;
    if !step.is_finite() || step <= 0.0 || step >= diameter {
        return Err(CircleError::InvalidStepSize { step, diameter });
    }

    let revolutions = discretization.revolutions;
    if !revolutions.is_finite() || revolutions <= 0.0 {
        return Err(CircleError::InvalidRevolutions(revolutions));
    }

    let increment = max_angular_increment(radius, step);
    if (TAU / increment).ceil() > MAX_SEGMENTS as f64 {
        return Err(CircleError::InvalidStepSize { step, diameter });
    }

    let sweep = revolutions * TAU;
    let required = (sweep / increment).ceil();
    if required > MAX_SEGMENTS as f64 {
        return Err(CircleError::InvalidRevolutions(revolutions));
    }
    let required = required as usize;

    let segments = match discretization.waypoint_count {
        Some(per_revolution) => {
            let requested = (per_revolution.get() as f64 * revolutions).ceil();
            if requested > MAX_SEGMENTS as f64 {
                warn!(
                    "{} waypoints per revolution over {} revolutions is too many, capping at {} segments",
                    per_revolution, revolutions, MAX_SEGMENTS
                );
                MAX_SEGMENTS
            } else if (requested as usize) < required {
                warn!(
                    "{} waypoints per revolution exceed the {} m step limit, using {} segments instead",
                    per_revolution, step, required
                );
                required
            } else {
                requested as usize
            }
        }
        None => required,
    };

    Ok(segments.max(1))
}
