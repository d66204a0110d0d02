use foundation::Point3D;

use crate::camera::CameraFrame;
use crate::geometry::TrajectoryGeometry;
use crate::selection::DepthReadout;

pub const PLACEHOLDER_MESSAGE: &str = "No valid trajectory to render yet.";
pub const HINT_MESSAGE: &str = "Hover or click a point to inspect MD (ft).";

/// Everything a surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene<'a> {
    pub points: &'a [Point3D],
    pub geometry: &'a TrajectoryGeometry,
    pub camera: CameraFrame,
    pub selected: Option<usize>,
    pub readout: Option<DepthReadout>,
    pub hint: &'static str,
}

/// Drawing backend for a trajectory scene.
///
/// Implementations must draw the polyline in `geometry.polyline` order, place
/// pickable markers at exactly those positions and report pointer events back
/// using the same indices.
pub trait ViewerSurface {
    fn show_placeholder(&mut self, message: &str);
    fn draw(&mut self, scene: &RenderScene<'_>);
}
