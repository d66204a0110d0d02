//! Auto-framing for a trajectory.
//!
//! The camera orbits the bounds center and sits at a span-relative offset so
//! the full path is in view regardless of coordinate magnitude.

use foundation::math::Vec3;

use crate::convention::DepthConvention;
use crate::geometry::TrajectoryGeometry;

pub const FOV_DEG: f64 = 50.0;
pub const NEAR: f64 = 0.1;
pub const FAR: f64 = 100_000.0;
pub const GRID_DIVISIONS: u32 = 20;
pub const BACKGROUND_COLOR: &str = "#fff8ea";

/// Camera offset from the target, in spans.
const EYE_OFFSET: [f64; 3] = [1.4, 0.8, 1.4];

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: &'static str,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    /// Orbit target; also where the reference axes are drawn.
    pub target: Vec3,
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub light_position: Vec3,
    pub grid_size: f64,
    pub grid_divisions: u32,
    pub axis_labels: [AxisLabel; 3],
}

impl CameraFrame {
    pub fn frame(geometry: &TrajectoryGeometry) -> Self {
        frame_bounds(
            geometry.center(),
            geometry.span(),
            geometry.axis_length,
            geometry.convention,
        )
    }

    pub fn view_direction(&self) -> Option<Vec3> {
        (self.target - self.position).normalized()
    }
}

pub fn frame_bounds(
    center: Vec3,
    span: f64,
    axis_length: f64,
    convention: DepthConvention,
) -> CameraFrame {
    let offset = Vec3::new(EYE_OFFSET[0], EYE_OFFSET[1], EYE_OFFSET[2]).scale(span);
    CameraFrame {
        position: center + offset,
        target: center,
        fov_deg: FOV_DEG,
        near: NEAR,
        far: FAR,
        light_position: Vec3::splat(span),
        grid_size: span * 2.0,
        grid_divisions: GRID_DIVISIONS,
        axis_labels: [
            AxisLabel {
                text: "E",
                position: center + Vec3::new(axis_length, 0.0, 0.0),
            },
            AxisLabel {
                text: "N",
                position: center + Vec3::new(0.0, axis_length, 0.0),
            },
            AxisLabel {
                text: "MD (+)",
                position: center + convention.depth_axis().scale(axis_length),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::CameraFrame;
    use crate::convention::DepthConvention;
    use crate::geometry::build_geometry;
    use foundation::Point3D;
    use foundation::math::Vec3;

    fn two_points() -> [Point3D; 2] {
        [Point3D::new(0.0, 0.0, 0.0), Point3D::new(10.0, 20.0, 30.0)]
    }

    #[test]
    fn frames_on_center_with_span_offset() {
        let g = build_geometry(&two_points(), DepthConvention::Raw).expect("renderable");
        let cam = CameraFrame::frame(&g);
        assert_eq!(cam.target, Vec3::new(5.0, 10.0, 15.0));
        assert_eq!(cam.position, Vec3::new(5.0 + 42.0, 10.0 + 24.0, 15.0 + 42.0));
        assert_eq!(cam.light_position, Vec3::splat(30.0));
        assert_eq!(cam.grid_size, 60.0);
        assert!(cam.view_direction().is_some());
    }

    #[test]
    fn depth_label_follows_convention() {
        let down = build_geometry(&two_points(), DepthConvention::DepthDown).expect("renderable");
        let cam = CameraFrame::frame(&down);
        assert_eq!(cam.target, Vec3::new(5.0, 10.0, -15.0));
        let md = &cam.axis_labels[2];
        assert_eq!(md.text, "MD (+)");
        assert_eq!(md.position, Vec3::new(5.0, 10.0, -15.0 - 24.0));

        let raw = build_geometry(&two_points(), DepthConvention::Raw).expect("renderable");
        let cam = CameraFrame::frame(&raw);
        assert_eq!(cam.axis_labels[2].position, Vec3::new(5.0, 10.0, 15.0 + 24.0));
        assert_eq!(cam.axis_labels[0].position, Vec3::new(29.0, 10.0, 15.0));
    }
}
