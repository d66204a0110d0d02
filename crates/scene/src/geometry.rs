//! Renderable trajectory primitives.
//!
//! Marker sizes scale with the trajectory span but never drop below a
//! visibility floor, so a 50 ft test path and a 20 000 ft lateral both stay
//! legible.

use foundation::math::Vec3;
use foundation::{BoundingVolume, MIN_RENDERABLE_POINTS, Point3D};

use crate::convention::{DepthConvention, compute_bounds};

pub const MARKER_RADIUS_SCALE: f64 = 0.006;
pub const MARKER_RADIUS_MIN: f64 = 1.6;
pub const ENDPOINT_RADIUS_SCALE: f64 = 0.018;
pub const ENDPOINT_RADIUS_MIN: f64 = 6.0;
pub const AXIS_LENGTH_SCALE: f64 = 0.8;

pub const LINE_COLOR: &str = "#0f7b8a";
pub const LINE_WIDTH: f64 = 3.0;
pub const START_COLOR: &str = "#0d5e14";
pub const END_COLOR: &str = "#c7472f";
pub const MARKER_COLOR: &str = "#3f7d9e";
pub const SELECTED_COLOR: &str = "#f28f3b";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    Start,
    Interior,
    End,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderPoint {
    /// Index into the source point sequence.
    pub index: usize,
    pub position: Vec3,
    pub role: MarkerRole,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub opacity: f64,
    pub radius: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NotRenderable {
    pub point_count: usize,
}

impl std::fmt::Display for NotRenderable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "trajectory needs at least {MIN_RENDERABLE_POINTS} points, got {}",
            self.point_count
        )
    }
}

impl std::error::Error for NotRenderable {}

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryGeometry {
    pub convention: DepthConvention,
    pub polyline: Vec<RenderPoint>,
    /// Bounds in render space (same convention as `polyline`).
    pub bounds: BoundingVolume,
    pub marker_radius: f64,
    pub endpoint_radius: f64,
    pub axis_length: f64,
}

impl TrajectoryGeometry {
    pub fn span(&self) -> f64 {
        self.bounds.span()
    }

    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }

    pub fn start(&self) -> &RenderPoint {
        &self.polyline[0]
    }

    pub fn end(&self) -> &RenderPoint {
        &self.polyline[self.polyline.len() - 1]
    }

    pub fn marker_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.polyline.iter().map(|p| p.position)
    }

    /// Style for the per-point marker at `index`.
    ///
    /// Endpoint spheres are drawn on top with their own radius and colour;
    /// this covers the small pickable marker underneath.
    pub fn marker_style(&self, index: usize, selected: Option<usize>) -> MarkerStyle {
        if selected == Some(index) {
            MarkerStyle {
                color: SELECTED_COLOR,
                opacity: 0.95,
                radius: self.marker_radius,
            }
        } else {
            MarkerStyle {
                color: MARKER_COLOR,
                opacity: 0.45,
                radius: self.marker_radius,
            }
        }
    }

    pub fn endpoint_style(&self, role: MarkerRole) -> Option<MarkerStyle> {
        let color = match role {
            MarkerRole::Start => START_COLOR,
            MarkerRole::End => END_COLOR,
            MarkerRole::Interior => return None,
        };
        Some(MarkerStyle {
            color,
            opacity: 1.0,
            radius: self.endpoint_radius,
        })
    }
}

pub fn marker_radius(span: f64) -> f64 {
    (span * MARKER_RADIUS_SCALE).max(MARKER_RADIUS_MIN)
}

pub fn endpoint_radius(span: f64) -> f64 {
    (span * ENDPOINT_RADIUS_SCALE).max(ENDPOINT_RADIUS_MIN)
}

pub fn axis_length(span: f64) -> f64 {
    span * AXIS_LENGTH_SCALE
}

/// Maps points into render space and sizes the markers.
///
/// Fewer than two points is not renderable; the surface should show its
/// placeholder instead.
pub fn build_geometry(
    points: &[Point3D],
    convention: DepthConvention,
) -> Result<TrajectoryGeometry, NotRenderable> {
    if points.len() < MIN_RENDERABLE_POINTS {
        return Err(NotRenderable {
            point_count: points.len(),
        });
    }

    let last = points.len() - 1;
    let polyline: Vec<RenderPoint> = points
        .iter()
        .enumerate()
        .map(|(index, p)| RenderPoint {
            index,
            position: convention.to_render(*p),
            role: match index {
                0 => MarkerRole::Start,
                i if i == last => MarkerRole::End,
                _ => MarkerRole::Interior,
            },
        })
        .collect();

    let bounds = compute_bounds(points, convention);
    let span = bounds.span();

    Ok(TrajectoryGeometry {
        convention,
        polyline,
        bounds,
        marker_radius: marker_radius(span),
        endpoint_radius: endpoint_radius(span),
        axis_length: axis_length(span),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Point3D> {
        vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(100.0, 0.0, 200.0),
            Point3D::new(220.0, 80.0, 450.0),
            Point3D::new(350.0, 180.0, 720.0),
            Point3D::new(450.0, 320.0, 1100.0),
            Point3D::new(520.0, 450.0, 1450.0),
        ]
    }

    #[test]
    fn fewer_than_two_points_is_not_renderable() {
        assert_eq!(
            build_geometry(&[], DepthConvention::DepthDown),
            Err(NotRenderable { point_count: 0 })
        );
        let one = [Point3D::new(1e9, -1e9, 5.0)];
        assert_eq!(
            build_geometry(&one, DepthConvention::Raw),
            Err(NotRenderable { point_count: 1 })
        );
    }

    #[test]
    fn tags_endpoints_and_flips_depth() {
        let g = build_geometry(&sample(), DepthConvention::DepthDown).expect("renderable");
        assert_eq!(g.polyline.len(), 6);
        assert_eq!(g.start().role, MarkerRole::Start);
        assert_eq!(g.end().role, MarkerRole::End);
        assert!(g.polyline[1..5].iter().all(|p| p.role == MarkerRole::Interior));
        assert_eq!(g.polyline[2].position, Vec3::new(220.0, 80.0, -450.0));
        assert_eq!(g.end().index, 5);
    }

    #[test]
    fn two_points_are_start_and_end() {
        let pts = [Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 1.0, 1.0)];
        let g = build_geometry(&pts, DepthConvention::Raw).expect("renderable");
        assert_eq!(g.polyline[0].role, MarkerRole::Start);
        assert_eq!(g.polyline[1].role, MarkerRole::End);
    }

    #[test]
    fn sizes_follow_span_above_floor() {
        let g = build_geometry(&sample(), DepthConvention::DepthDown).expect("renderable");
        assert_eq!(g.span(), 1450.0);
        assert!((g.marker_radius - 8.7).abs() < 1e-9);
        assert!((g.endpoint_radius - 26.1).abs() < 1e-9);
        assert!((g.axis_length - 1160.0).abs() < 1e-9);
    }

    #[test]
    fn small_spans_hit_visibility_floor() {
        let pts = [Point3D::new(0.0, 0.0, 0.0), Point3D::new(0.5, 0.0, 0.0)];
        let g = build_geometry(&pts, DepthConvention::DepthDown).expect("renderable");
        assert_eq!(g.span(), 1.0);
        assert_eq!(g.marker_radius, MARKER_RADIUS_MIN);
        assert_eq!(g.endpoint_radius, ENDPOINT_RADIUS_MIN);
        assert_eq!(g.axis_length, 0.8);
    }

    #[test]
    fn selected_marker_is_highlighted() {
        let g = build_geometry(&sample(), DepthConvention::DepthDown).expect("renderable");
        assert_eq!(g.marker_style(3, Some(3)).color, SELECTED_COLOR);
        assert_eq!(g.marker_style(2, Some(3)).color, MARKER_COLOR);
        assert_eq!(g.marker_style(2, None).opacity, 0.45);
        assert_eq!(g.endpoint_style(MarkerRole::End).map(|s| s.color), Some(END_COLOR));
        assert!(g.endpoint_style(MarkerRole::Interior).is_none());
    }
}
