//! Circle job parameter files

use crate::circle::{CircleSpec, Plane};
use crate::common::types::Pose;
use crate::orientation::{ConstantOrientation, OrientationPolicy, TangentFollowing};
use crate::planner::CircleMotion;
use crate::sampler::{Direction, Discretization};
use nalgebra::{Point3, Quaternion, UnitQuaternion, Vector3};
use serde::Deserialize;
use std::fs::read_to_string;
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot load the parameter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Orientation rule selected in a parameter file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationMode {
    #[default]
    Constant,
    Tangent,
}

impl OrientationMode {
    pub fn policy(&self) -> Box<dyn OrientationPolicy> {
        match self {
            OrientationMode::Constant => Box::new(ConstantOrientation),
            OrientationMode::Tangent => Box::new(TangentFollowing),
        }
    }
}

/// Radius used with `plane` or `normal` when the file gives none (m)
pub const DEFAULT_RADIUS: f64 = 0.10;

/// Parameters of a circle job.
///
/// `center` and `normal`, when present, take precedence over `plane`. With a
/// `center`, `radius` is optional and only checked against the start pose.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    pub radius: Option<f64>,
    pub plane: Plane,
    pub center: Option<[f64; 3]>,
    pub normal: Option<[f64; 3]>,

    pub max_linear_step: f64,
    pub waypoint_count: Option<usize>,
    pub revolutions: f64,
    pub direction: Direction,
    pub orientation: OrientationMode,

    pub start_position: [f64; 3],
    /// Start orientation as `[x, y, z, w]`
    pub start_orientation: [f64; 4],

    pub eef_step: f64,
    pub jump_threshold: f64,
    pub velocity_scale: f64,
    pub execute: bool,
    pub completeness_threshold: f64,
}

impl Default for CircleConfig {
    fn default() -> Self {
        CircleConfig {
            radius: None,
            plane: Plane::XY,
            center: None,
            normal: None,
            max_linear_step: 0.005,
            waypoint_count: None,
            revolutions: 1.0,
            direction: Direction::CounterClockwise,
            orientation: OrientationMode::Constant,
            start_position: [0.4, 0.0, 0.4],
            start_orientation: [0.0, 0.0, 0.0, 1.0],
            eef_step: 0.005,
            jump_threshold: 0.0,
            velocity_scale: 0.2,
            execute: true,
            completeness_threshold: 0.95,
        }
    }
}

impl CircleConfig {
    /// The start pose, with its orientation normalised
    pub fn start_pose(&self) -> Result<Pose, LoadError> {
        let [x, y, z, w] = self.start_orientation;
        let orientation = UnitQuaternion::try_new(Quaternion::new(w, x, y, z), 1e-9)
            .ok_or_else(|| LoadError::InvalidParameter("start_orientation has zero length".to_string()))?;

        Ok(Pose::new(Point3::from(self.start_position), orientation))
    }

    pub fn circle_spec(&self) -> CircleSpec {
        let radius = self.radius.unwrap_or(DEFAULT_RADIUS);
        match self.center {
            Some(center) => CircleSpec {
                center: Some(Point3::from(center)),
                radius: self.radius,
                normal: self.normal.map(Vector3::from),
            },
            None => match self.normal {
                Some(normal) => CircleSpec::from_radius_normal(radius, Vector3::from(normal)),
                None => CircleSpec::in_plane(radius, self.plane),
            },
        }
    }

    pub fn discretization(&self) -> Result<Discretization, LoadError> {
        let mut discretization = Discretization::new(self.max_linear_step)
            .with_revolutions(self.revolutions)
            .with_direction(self.direction);

        if let Some(count) = self.waypoint_count {
            let count = NonZeroUsize::new(count)
                .ok_or_else(|| LoadError::InvalidParameter("waypoint_count must be positive".to_string()))?;
            discretization = discretization.with_waypoint_count(count);
        }

        Ok(discretization)
    }

    /// The planner request described by this configuration
    pub fn motion(&self) -> Result<CircleMotion, LoadError> {
        let mut motion = CircleMotion::new(self.start_pose()?, self.circle_spec(), self.discretization()?);
        motion.eef_step = self.eef_step;
        motion.jump_threshold = self.jump_threshold;
        motion.velocity_scale = self.velocity_scale;
        motion.execute = self.execute;
        motion.completeness_threshold = self.completeness_threshold;
        Ok(motion)
    }
}

/// Load a circle parameter file
pub fn load<P: AsRef<Path>>(path: P) -> Result<CircleConfig, LoadError> {
    let params_str = read_to_string(path).map_err(LoadError::FileLoadError)?;
    parse(&params_str)
}

/// Parse circle parameters from a TOML string
pub fn parse(params_str: &str) -> Result<CircleConfig, LoadError> {
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, CircleConfig::default());
        assert_eq!(config.circle_spec(), CircleSpec::in_plane(0.1, Plane::XY));
    }

    #[test]
    fn parses_a_full_job() {
        let config = parse(
            r#"
            radius = 0.05
            plane = "xz"
            max_linear_step = 0.01
            waypoint_count = 60
            revolutions = 2.0
            direction = "cw"
            orientation = "tangent"
            start_position = [0.5, 0.1, 0.3]
            start_orientation = [1.0, 0.0, 0.0, 0.0]
            execute = false
            "#,
        )
        .unwrap();

        assert_eq!(config.plane, Plane::XZ);
        assert_eq!(config.direction, Direction::Clockwise);
        assert_eq!(config.orientation, OrientationMode::Tangent);
        assert_eq!(config.orientation.policy().name(), "TangentFollowing");

        let d = config.discretization().unwrap();
        assert_eq!(d.waypoint_count.map(|c| c.get()), Some(60));
        assert_eq!(d.revolutions, 2.0);

        let motion = config.motion().unwrap();
        assert!(!motion.execute);
        assert_eq!(motion.start.position, Point3::new(0.5, 0.1, 0.3));
        assert_eq!(motion.start.orientation.i, 1.0);
    }

    #[test]
    fn center_overrides_plane() {
        let config = parse(
            r#"
            radius = 0.1
            center = [0.3, 0.0, 0.4]
            normal = [0.0, 0.0, 1.0]
            "#,
        )
        .unwrap();

        let spec = config.circle_spec();
        assert_eq!(spec.center, Some(Point3::new(0.3, 0.0, 0.4)));
        assert_eq!(spec.radius, Some(0.1));
        assert_eq!(spec.normal, Some(Vector3::z()));
    }

    #[test]
    fn center_only_takes_radius_from_start_pose() {
        let config = parse(
            r#"
            center = [0.2, 0.0, 0.4]
            start_position = [0.4, 0.0, 0.4]
            "#,
        )
        .unwrap();

        let spec = config.circle_spec();
        assert_eq!(spec.radius, None);

        let waypoints = crate::generate(
            &config.start_pose().unwrap(),
            &spec,
            &config.discretization().unwrap(),
            config.orientation.policy().as_ref(),
        )
        .unwrap();
        for pose in &waypoints {
            let distance = nalgebra::distance(&pose.position, &Point3::new(0.2, 0.0, 0.4));
            assert!((distance - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn loads_the_sample_parameter_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/circle.toml");
        let config = load(&path).unwrap();

        assert_eq!(config.radius, Some(0.10));
        assert_eq!(config.plane, Plane::XY);
        assert_eq!(config.orientation, OrientationMode::Constant);

        let motion = config.motion().unwrap();
        let waypoints = crate::generate(
            &motion.start,
            &motion.spec,
            &motion.discretization,
            config.orientation.policy().as_ref(),
        )
        .unwrap();
        assert!(waypoints.len() > 2);

        assert!(matches!(
            load(Path::new(env!("CARGO_MANIFEST_DIR")).join("config/missing.toml")),
            Err(LoadError::FileLoadError(_))
        ));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(parse("plane = \"ab\""), Err(LoadError::DeserialiseError(_))));

        let config = parse("waypoint_count = 0").unwrap();
        assert!(matches!(config.discretization(), Err(LoadError::InvalidParameter(_))));

        let config = parse("start_orientation = [0.0, 0.0, 0.0, 0.0]").unwrap();
        assert!(matches!(config.start_pose(), Err(LoadError::InvalidParameter(_))));
    }
}
