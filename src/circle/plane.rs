//! Axis-aligned drawing planes

use nalgebra::{Unit, Vector3};
use serde::Deserialize;

/// One of the three world-aligned planes a circle can be drawn in.
///
/// For a plane spanned by axes (a, b) the circle starts at +a from its
/// center and moves towards +b, so the normal is `a × b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    XY,
    YZ,
    XZ,
}

impl Plane {
    /// Unit normal of the plane, `a × b`
    pub fn normal(&self) -> Unit<Vector3<f64>> {
        match self {
            Plane::XY => Vector3::z_axis(),
            Plane::YZ => Vector3::x_axis(),
            Plane::XZ => Unit::new_unchecked(-Vector3::y()),
        }
    }

    /// The first axis `a` of the plane
    pub fn first_axis(&self) -> Unit<Vector3<f64>> {
        match self {
            Plane::XY | Plane::XZ => Vector3::x_axis(),
            Plane::YZ => Vector3::y_axis(),
        }
    }
}

impl std::str::FromStr for Plane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Plane::XY),
            "yz" => Ok(Plane::YZ),
            "xz" => Ok(Plane::XZ),
            other => Err(format!("unknown plane \"{}\", expected xy, yz or xz", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_first_cross_second() {
        let cases = [
            (Plane::XY, Vector3::y()),
            (Plane::YZ, Vector3::z()),
            (Plane::XZ, Vector3::z()),
        ];
        for (plane, second) in cases {
            let expected = plane.first_axis().cross(&second);
            assert!((plane.normal().into_inner() - expected).norm() < 1e-12, "{:?}", plane);
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("XY".parse::<Plane>(), Ok(Plane::XY));
        assert_eq!("yz".parse::<Plane>(), Ok(Plane::YZ));
        assert!("xx".parse::<Plane>().is_err());
    }
}
