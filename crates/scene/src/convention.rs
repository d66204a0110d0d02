use foundation::math::Vec3;
use foundation::{BoundingVolume, Point3D};

/// How measured depth maps onto the render depth axis.
///
/// Bounds, geometry and camera placement must all use the same value; mixing
/// them misaligns the camera target with the drawn path and the pick targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DepthConvention {
    /// `z` is negated so increasing MD renders downward.
    #[default]
    DepthDown,
    /// `z` is rendered as given.
    Raw,
}

impl DepthConvention {
    pub fn to_render(self, p: Point3D) -> Vec3 {
        match self {
            DepthConvention::DepthDown => Vec3::new(p.x, p.y, -p.z),
            DepthConvention::Raw => p.to_vec3(),
        }
    }

    /// Unit vector along which MD increases in render space.
    pub fn depth_axis(self) -> Vec3 {
        match self {
            DepthConvention::DepthDown => Vec3::new(0.0, 0.0, -1.0),
            DepthConvention::Raw => Vec3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DepthConvention::DepthDown => "depth-down",
            DepthConvention::Raw => "raw",
        }
    }
}

impl std::str::FromStr for DepthConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth-down" | "depth_down" | "down" => Ok(DepthConvention::DepthDown),
            "raw" | "up" => Ok(DepthConvention::Raw),
            other => Err(format!("unknown depth convention: {other}")),
        }
    }
}

impl std::fmt::Display for DepthConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds of the points after mapping through `convention`.
///
/// An empty slice yields an invalid (inverted) volume; gate on renderability
/// before framing.
pub fn compute_bounds(points: &[Point3D], convention: DepthConvention) -> BoundingVolume {
    BoundingVolume::from_points(points.iter().map(|p| convention.to_render(*p)))
}
