use crate::math::{Vec3, max_with_floor};

/// Smallest span used for framing, so single points and flat paths still get
/// a non-degenerate camera distance and marker scale.
pub const MIN_SPAN: f64 = 1.0;

/// Axis-aligned bounding volume over render-space positions.
///
/// An empty volume has `min = +inf` and `max = -inf`; [`BoundingVolume::is_valid`]
/// is false until at least one finite point has been included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingVolume {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        BoundingVolume { min, max }
    }

    pub fn empty() -> Self {
        Self::new(Vec3::splat(f64::INFINITY), Vec3::splat(f64::NEG_INFINITY))
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut out = Self::empty();
        for p in points {
            out.include(p);
        }
        out
    }

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max).scale(0.5)
    }

    /// Largest axis extent, floored at [`MIN_SPAN`].
    pub fn span(&self) -> f64 {
        let e = self.extent();
        max_with_floor(&[e.x, e.y, e.z], MIN_SPAN)
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingVolume;
    use crate::math::Vec3;

    #[test]
    fn two_point_bounds_center_and_span() {
        let b = BoundingVolume::from_points([Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)]);
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(b.center(), Vec3::new(5.0, 10.0, 15.0));
        assert_eq!(b.span(), 30.0);
    }

    #[test]
    fn repeated_point_span_is_floored() {
        let p = Vec3::splat(5.0);
        let b = BoundingVolume::from_points([p, p]);
        assert!(b.is_valid());
        assert_eq!(b.extent(), Vec3::ZERO);
        assert_eq!(b.span(), 1.0);
        assert_eq!(b.center(), p);
    }

    #[test]
    fn empty_volume_is_invalid() {
        let b = BoundingVolume::from_points(std::iter::empty());
        assert!(!b.is_valid());
        assert_eq!(b.min.x, f64::INFINITY);
        assert_eq!(b.max.z, f64::NEG_INFINITY);
    }
}
