use crate::math::Vec3;

/// One trajectory station: easting, northing and measured depth.
///
/// Values are always finite when produced by the coordinate parser. `z` is the
/// source MD value and is never sign-flipped here; render conventions map it
/// onto render space separately.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a point only if all three coordinates are finite.
    pub fn finite(x: f64, y: f64, z: f64) -> Option<Self> {
        let p = Self::new(x, y, z);
        p.is_finite().then_some(p)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Identity mapping into render space (no depth flip).
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Point3D> for Vec3 {
    fn from(p: Point3D) -> Self {
        p.to_vec3()
    }
}

/// Polylines need at least two stations to be drawn.
pub const MIN_RENDERABLE_POINTS: usize = 2;

pub fn is_renderable(points: &[Point3D]) -> bool {
    points.len() >= MIN_RENDERABLE_POINTS
}

#[cfg(test)]
mod tests {
    use super::{Point3D, is_renderable};

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert!(Point3D::finite(1.0, 2.0, 3.0).is_some());
        assert!(Point3D::finite(f64::NAN, 2.0, 3.0).is_none());
        assert!(Point3D::finite(1.0, f64::INFINITY, 3.0).is_none());
        assert!(Point3D::finite(1.0, 2.0, f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn renderable_needs_two_points() {
        let p = Point3D::new(0.0, 0.0, 0.0);
        assert!(!is_renderable(&[]));
        assert!(!is_renderable(&[p]));
        assert!(is_renderable(&[p, p]));
    }
}
