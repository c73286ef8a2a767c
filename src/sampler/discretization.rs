//! Discretization policy for the waypoint sampler

use serde::Deserialize;
use std::num::NonZeroUsize;

/// Direction of travel as seen looking along the circle normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[serde(rename = "cw")]
    Clockwise,
}

impl Direction {
    /// Sign applied to angular increments
    pub fn sign(&self) -> f64 {
        match self {
            Direction::CounterClockwise => 1.0,
            Direction::Clockwise => -1.0,
        }
    }
}

/// How finely, how far and which way the circle is walked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretization {
    /// Largest straight-line distance allowed between consecutive waypoints (m)
    pub max_linear_step: f64,
    /// Requested segments per full revolution. Raised if it would break
    /// `max_linear_step`.
    pub waypoint_count: Option<NonZeroUsize>,
    /// Number of turns. Whole numbers give a closed loop, anything else an arc.
    pub revolutions: f64,
    pub direction: Direction,
}

impl Discretization {
    /// One counter-clockwise revolution bounded by `max_linear_step`
    pub fn new(max_linear_step: f64) -> Self {
        Discretization {
            max_linear_step,
            waypoint_count: None,
            revolutions: 1.0,
            direction: Direction::default(),
        }
    }

    pub fn with_waypoint_count(mut self, waypoint_count: NonZeroUsize) -> Self {
        self.waypoint_count = Some(waypoint_count);
        self
    }

    pub fn with_revolutions(mut self, revolutions: f64) -> Self {
        self.revolutions = revolutions;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Whether the path ends where it started
    pub fn is_closed(&self) -> bool {
        self.revolutions.fract() == 0.0
    }
}
