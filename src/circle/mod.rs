//! Circle parametrization
//!
//! Resolves a complete circle (center, radius, normal and the in-plane
//! reference axis) from a start pose and a partial description, and reports
//! the angle at which the start pose sits on that circle.
pub mod plane;

pub use self::plane::Plane;

use crate::common::tolerances::{MIN_NORMAL_NORM, MIN_RADIUS, RADIUS_REL_TOLERANCE};
use crate::common::types::Pose;
use crate::error::CircleError;
use log::debug;
use nalgebra::{Point3, Unit, Vector3};

/// A fully resolved circle in 3D space.
///
/// Points are parametrised as `center + radius * (cos θ * u + sin θ * v)`
/// where `u` is the reference axis and `v = normal × u`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point3<f64>,
    radius: f64,
    normal: Unit<Vector3<f64>>,
    reference: Unit<Vector3<f64>>,
}

impl Circle {
    /// Create a circle from its center, radius and normal.
    ///
    /// θ = 0 is placed along the default reference axis of the normal, see
    /// [`reference_axis`].
    pub fn new(center: Point3<f64>, radius: f64, normal: Vector3<f64>) -> Result<Self, CircleError> {
        if !(center.coords.iter().all(|c| c.is_finite()) && radius.is_finite()) {
            return Err(CircleError::GeometryInconsistent(
                "circle center and radius must be finite".to_string(),
            ));
        }
        if radius < MIN_RADIUS {
            return Err(CircleError::DegenerateCircle { radius });
        }

        let normal = unit_normal(&normal)?;

        Ok(Circle {
            center,
            radius,
            normal,
            reference: reference_axis(&normal),
        })
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.normal
    }

    /// In-plane unit vector pointing at θ = 0 (`u`)
    pub fn reference_axis(&self) -> Unit<Vector3<f64>> {
        self.reference
    }

    /// In-plane unit vector pointing at θ = π/2 (`v = normal × u`)
    pub fn binormal(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(self.normal.cross(&self.reference.into_inner()))
    }

    /// Point on the circle at angle `theta`
    pub fn point_at(&self, theta: f64) -> Point3<f64> {
        let (u, v) = (self.reference.into_inner(), self.binormal().into_inner());
        self.center + self.radius * (theta.cos() * u + theta.sin() * v)
    }

    /// Unit tangent at `theta`, pointing in the counter-clockwise direction
    pub fn tangent_at(&self, theta: f64) -> Vector3<f64> {
        let (u, v) = (self.reference.into_inner(), self.binormal().into_inner());
        -theta.sin() * u + theta.cos() * v
    }

    /// Angle of `point` around the circle, in (-π, π].
    ///
    /// Points off the plane are projected along the normal first.
    pub fn angle_of(&self, point: &Point3<f64>) -> f64 {
        let offset = point - self.center;
        offset
            .dot(&self.binormal().into_inner())
            .atan2(offset.dot(&self.reference.into_inner()))
    }
}

/// A partial circle description.
///
/// Either the center, or both the radius and the normal, must be given.
/// When the center is known the radius is taken as its distance to the start
/// pose, and a supplied radius is only used as a consistency check.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircleSpec {
    pub center: Option<Point3<f64>>,
    pub radius: Option<f64>,
    pub normal: Option<Vector3<f64>>,
}

impl CircleSpec {
    /// Circle around `center`; radius and normal derived from the start pose
    pub fn from_center(center: Point3<f64>) -> Self {
        CircleSpec {
            center: Some(center),
            ..Default::default()
        }
    }

    /// Circle of `radius` in the plane with the given normal, starting at the
    /// start pose
    pub fn from_radius_normal(radius: f64, normal: Vector3<f64>) -> Self {
        CircleSpec {
            center: None,
            radius: Some(radius),
            normal: Some(normal),
        }
    }

    /// Circle of `radius` in a world-aligned plane.
    ///
    /// The center lies one radius behind the start pose along the plane's
    /// first axis.
    pub fn in_plane(radius: f64, plane: Plane) -> Self {
        Self::from_radius_normal(radius, plane.normal().into_inner())
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = Some(normal);
        self
    }
}

/// A circle together with the pose it is entered at.
///
/// `start.position` must be the point of `circle` at `start_angle`; it becomes
/// the first waypoint unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametrizedCircle {
    pub circle: Circle,
    /// Angle of the start pose around the circle
    pub start_angle: f64,
    pub start: Pose,
}

/// Resolve the full circle described by `spec` that passes through `start`.
pub fn parametrize(start: &Pose, spec: &CircleSpec) -> Result<ParametrizedCircle, CircleError> {
    check_finite(start, spec)?;

    let normal = match spec.normal {
        Some(n) => Some(unit_normal(&n)?),
        None => None,
    };

    if let Some(radius) = spec.radius {
        if radius < MIN_RADIUS {
            return Err(CircleError::DegenerateCircle { radius });
        }
    }

    let circle = match (spec.center, spec.radius, normal) {
        (Some(center), radius, normal) => {
            let offset = start.position - center;
            let distance = offset.norm();
            if distance < MIN_RADIUS {
                return Err(CircleError::DegenerateCircle { radius: distance });
            }

            if let Some(radius) = radius {
                let deviation = (distance - radius).abs() / radius;
                if deviation > RADIUS_REL_TOLERANCE {
                    return Err(CircleError::GeometryInconsistent(format!(
                        "start pose is {:.6} from the center but the radius is {:.6}",
                        distance, radius
                    )));
                }
            }

            let reference = Unit::new_normalize(offset);
            let normal = match normal {
                Some(normal) => {
                    let out_of_plane = offset.dot(&normal.into_inner());
                    if out_of_plane.abs() > RADIUS_REL_TOLERANCE * distance {
                        return Err(CircleError::GeometryInconsistent(format!(
                            "start pose lies {:.6} off the circle plane",
                            out_of_plane
                        )));
                    }
                    // Remove the residual component along u so the basis stays orthonormal
                    let (n, u) = (normal.into_inner(), reference.into_inner());
                    Unit::new_normalize(n - n.dot(&u) * u)
                }
                None => orthogonal_normal(&reference),
            };

            Circle {
                center,
                radius: distance,
                normal,
                reference,
            }
        }
        (None, Some(radius), Some(normal)) => {
            let reference = reference_axis(&normal);
            Circle {
                center: start.position - reference.into_inner() * radius,
                radius,
                normal,
                reference,
            }
        }
        _ => {
            return Err(CircleError::GeometryInconsistent(
                "a center, or both a radius and a normal, are required".to_string(),
            ))
        }
    };

    let start_angle = circle.angle_of(&start.position);

    debug!(
        "Parametrized circle: center={:?}, radius={}, normal={:?}, start_angle={}",
        circle.center.coords.as_slice(),
        circle.radius,
        circle.normal.as_slice(),
        start_angle
    );

    Ok(ParametrizedCircle {
        circle,
        start_angle,
        start: *start,
    })
}

/// Default in-plane reference axis of a plane with the given normal.
///
/// This is world +X projected onto the plane, or world +Y when the normal is
/// (nearly) parallel to X. For the XY, YZ and XZ planes it is the plane's
/// first axis.
pub fn reference_axis(normal: &Unit<Vector3<f64>>) -> Unit<Vector3<f64>> {
    let n = normal.into_inner();
    let project = |axis: Vector3<f64>| axis - axis.dot(&n) * n;

    Unit::try_new(project(Vector3::x()), 0.1)
        .unwrap_or_else(|| Unit::new_normalize(project(Vector3::y())))
}

/// Normal for a circle with no plane given: world +Z made orthogonal to the
/// start direction, or world +X if the start direction is vertical.
fn orthogonal_normal(reference: &Unit<Vector3<f64>>) -> Unit<Vector3<f64>> {
    let u = reference.into_inner();
    let project = |axis: Vector3<f64>| axis - axis.dot(&u) * u;

    Unit::try_new(project(Vector3::z()), 0.1)
        .unwrap_or_else(|| Unit::new_normalize(project(Vector3::x())))
}

fn unit_normal(normal: &Vector3<f64>) -> Result<Unit<Vector3<f64>>, CircleError> {
    Unit::try_new(*normal, MIN_NORMAL_NORM).ok_or_else(|| {
        CircleError::GeometryInconsistent(format!(
            "normal {:?} has zero length",
            normal.as_slice()
        ))
    })
}

fn check_finite(start: &Pose, spec: &CircleSpec) -> Result<(), CircleError> {
    let finite = start.position.coords.iter().all(|c| c.is_finite())
        && start.orientation.coords.iter().all(|c| c.is_finite())
        && spec.center.map_or(true, |c| c.coords.iter().all(|v| v.is_finite()))
        && spec.radius.map_or(true, f64::is_finite)
        && spec.normal.map_or(true, |n| n.iter().all(|v| v.is_finite()));

    if finite {
        Ok(())
    } else {
        Err(CircleError::GeometryInconsistent(
            "start pose and circle description must be finite".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn start_at(x: f64, y: f64, z: f64) -> Pose {
        Pose::from_position(Point3::new(x, y, z))
    }

    #[test]
    fn center_and_normal_give_radius_and_zero_start_angle() {
        let spec = CircleSpec::from_center(Point3::origin()).with_normal(Vector3::z());
        let p = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap();

        assert!((p.circle.radius() - 0.1).abs() < EPS);
        assert!(p.start_angle.abs() < EPS);
        assert!((p.circle.point_at(0.0) - Point3::new(0.1, 0.0, 0.0)).norm() < EPS);
        assert!((p.circle.point_at(FRAC_PI_2) - Point3::new(0.0, 0.1, 0.0)).norm() < EPS);
    }

    #[test]
    fn normal_is_normalised() {
        let spec = CircleSpec::from_center(Point3::origin()).with_normal(Vector3::new(0.0, 0.0, 5.0));
        let p = parametrize(&start_at(0.0, 0.2, 0.0), &spec).unwrap();
        assert!((p.circle.normal().norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn matching_radius_within_tolerance_is_accepted() {
        let spec = CircleSpec::from_center(Point3::origin())
            .with_radius(0.10005)
            .with_normal(Vector3::z());
        let p = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap();
        // Measured distance wins over the supplied radius
        assert!((p.circle.radius() - 0.1).abs() < EPS);
    }

    #[test]
    fn mismatching_radius_is_inconsistent() {
        let spec = CircleSpec::from_center(Point3::origin())
            .with_radius(0.2)
            .with_normal(Vector3::z());
        let err = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap_err();
        assert!(matches!(err, CircleError::GeometryInconsistent(_)));
    }

    #[test]
    fn start_off_plane_is_inconsistent() {
        let spec = CircleSpec::from_center(Point3::origin()).with_normal(Vector3::z());
        let err = parametrize(&start_at(0.1, 0.0, 0.05), &spec).unwrap_err();
        assert!(matches!(err, CircleError::GeometryInconsistent(_)));
    }

    #[test]
    fn zero_normal_is_inconsistent() {
        let spec = CircleSpec::from_center(Point3::origin()).with_normal(Vector3::zeros());
        let err = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap_err();
        assert!(matches!(err, CircleError::GeometryInconsistent(_)));
    }

    #[test]
    fn zero_radius_is_degenerate() {
        let spec = CircleSpec::from_radius_normal(0.0, Vector3::z());
        let err = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap_err();
        assert_eq!(err, CircleError::DegenerateCircle { radius: 0.0 });

        // Start pose on the center
        let spec = CircleSpec::from_center(Point3::new(0.1, 0.0, 0.0)).with_normal(Vector3::z());
        let err = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap_err();
        assert!(matches!(err, CircleError::DegenerateCircle { .. }));
    }

    #[test]
    fn underdetermined_spec_is_inconsistent() {
        let start = start_at(0.1, 0.0, 0.0);
        for spec in [
            CircleSpec::default(),
            CircleSpec::default().with_radius(0.1),
            CircleSpec::default().with_normal(Vector3::z()),
        ] {
            let err = parametrize(&start, &spec).unwrap_err();
            assert!(matches!(err, CircleError::GeometryInconsistent(_)), "{:?}", spec);
        }
    }

    #[test]
    fn non_finite_input_is_inconsistent() {
        let spec = CircleSpec::from_radius_normal(f64::NAN, Vector3::z());
        let err = parametrize(&start_at(0.1, 0.0, 0.0), &spec).unwrap_err();
        assert!(matches!(err, CircleError::GeometryInconsistent(_)));
    }

    #[test]
    fn center_only_derives_horizontal_plane() {
        let p = parametrize(&start_at(1.1, 2.0, 0.3), &CircleSpec::from_center(Point3::new(1.0, 2.0, 0.3)))
            .unwrap();
        assert!((p.circle.normal().into_inner() - Vector3::z()).norm() < EPS);
        assert!((p.circle.radius() - 0.1).abs() < EPS);

        // Vertical offset falls back to a plane containing Z
        let p = parametrize(&start_at(0.0, 0.0, 0.5), &CircleSpec::from_center(Point3::origin()))
            .unwrap();
        assert!(p.circle.normal().dot(&Vector3::z()).abs() < EPS);
    }

    #[test]
    fn plane_shortcut_places_center_behind_start() {
        let start = start_at(0.4, 0.1, 0.3);
        let cases = [
            (Plane::XY, Point3::new(0.3, 0.1, 0.3), Point3::new(0.3, 0.2, 0.3)),
            (Plane::YZ, Point3::new(0.4, 0.0, 0.3), Point3::new(0.4, 0.0, 0.4)),
            (Plane::XZ, Point3::new(0.3, 0.1, 0.3), Point3::new(0.3, 0.1, 0.4)),
        ];
        for (plane, center, quarter) in cases {
            let p = parametrize(&start, &CircleSpec::in_plane(0.1, plane)).unwrap();
            let circle = p.circle;
            assert!((circle.center() - center).norm() < EPS, "{:?}", plane);
            assert!(p.start_angle.abs() < EPS);
            // Quarter turn counter-clockwise reaches center + r * b
            assert!((circle.point_at(FRAC_PI_2) - quarter).norm() < EPS, "{:?}", plane);
        }
    }

    #[test]
    fn reference_axis_matches_plane_first_axis() {
        for plane in [Plane::XY, Plane::YZ, Plane::XZ] {
            let axis = reference_axis(&plane.normal());
            assert!((axis.into_inner() - plane.first_axis().into_inner()).norm() < EPS);
        }
    }

    #[test]
    fn angle_of_inverts_point_at() {
        let circle = Circle::new(Point3::new(1.0, -1.0, 0.5), 0.25, Vector3::new(1.0, 1.0, 1.0)).unwrap();
        for theta in [-3.0, -1.0, 0.0, 0.5, 2.0, 3.0] {
            let angle = circle.angle_of(&circle.point_at(theta));
            assert!((angle - theta).abs() < 1e-9, "{} vs {}", angle, theta);
        }
    }

    #[test]
    fn tangent_is_unit_and_perpendicular() {
        let circle = Circle::new(Point3::origin(), 2.0, Vector3::new(0.0, 1.0, 1.0)).unwrap();
        for theta in [0.0, 1.0, 2.5] {
            let t = circle.tangent_at(theta);
            let radial = circle.point_at(theta) - circle.center();
            assert!((t.norm() - 1.0).abs() < EPS);
            assert!(t.dot(&radial).abs() < EPS);
            assert!(t.dot(&circle.normal().into_inner()).abs() < EPS);
        }
    }

    #[test]
    fn circle_new_validates() {
        assert!(matches!(
            Circle::new(Point3::origin(), 1e-9, Vector3::z()),
            Err(CircleError::DegenerateCircle { .. })
        ));
        assert!(matches!(
            Circle::new(Point3::origin(), 1.0, Vector3::zeros()),
            Err(CircleError::GeometryInconsistent(_))
        ));
    }
}
