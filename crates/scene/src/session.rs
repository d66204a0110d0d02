//! Viewer session state.
//!
//! Owns the editor text, the applied trajectory, the status line and the
//! selection. Every replacement of the applied text (apply, sample, file load)
//! rebuilds the points and starts the selection over at idle.

use foundation::math::Vec3;
use foundation::{Point3D, is_renderable};
use formats::{ParseOptions, parse_coordinates_with};

use crate::camera::CameraFrame;
use crate::convention::DepthConvention;
use crate::geometry::{NotRenderable, TrajectoryGeometry, build_geometry};
use crate::picking::{Ray, resolve_pick, resolve_pick_nearest};
use crate::selection::{DepthReadout, PointerEvent, SelectionController};
use crate::surface::{HINT_MESSAGE, PLACEHOLDER_MESSAGE, RenderScene, ViewerSurface};

pub const SAMPLE_COORDINATES: &str = "0,0,0
100,0,200
220,80,450
350,180,720
450,320,1100
520,450,1450";

pub const DEFAULT_WELL_NAME: &str = "Carpenter 11-31 A Unit L2H";
pub const DEFAULT_WELL_FILE: &str = "well-1.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub convention: DepthConvention,
    pub parse: ParseOptions,
    pub well_name: String,
    /// Display name of the default data file used in status messages.
    pub well_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            convention: DepthConvention::default(),
            parse: ParseOptions::default(),
            well_name: DEFAULT_WELL_NAME.to_string(),
            well_file: DEFAULT_WELL_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Request completed with a non-success status.
    Status(u16),
    /// Request never produced a response (I/O, DNS, TLS, ...).
    Transport(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Status(code) => write!(f, "failed to load well file ({code})"),
            LoadError::Transport(msg) => write!(f, "failed to load well file: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { point_count: usize },
    TooFewPoints { point_count: usize },
    Failed,
}

#[derive(Debug, Clone)]
pub struct ViewerSession {
    config: SessionConfig,
    editor_text: String,
    applied_text: String,
    points: Vec<Point3D>,
    geometry: Option<TrajectoryGeometry>,
    status: String,
    selection: SelectionController,
}

impl ViewerSession {
    /// Starts on the built-in sample trajectory.
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            editor_text: SAMPLE_COORDINATES.to_string(),
            applied_text: String::new(),
            points: Vec::new(),
            geometry: None,
            status: String::new(),
            selection: SelectionController::default(),
        };
        session.replace_applied(SAMPLE_COORDINATES.to_string());
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn editor_text(&self) -> &str {
        &self.editor_text
    }

    pub fn applied_text(&self) -> &str {
        &self.applied_text
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    pub fn geometry(&self) -> Result<&TrajectoryGeometry, NotRenderable> {
        self.geometry.as_ref().ok_or(NotRenderable {
            point_count: self.points.len(),
        })
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Updates the editor only; the applied trajectory is untouched.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.editor_text = text.into();
    }

    pub fn preview_points(&self) -> Vec<Point3D> {
        parse_coordinates_with(&self.editor_text, self.config.parse)
    }

    /// Points detected in the editor text.
    pub fn preview_count(&self) -> usize {
        self.preview_points().len()
    }

    pub fn can_apply(&self) -> bool {
        is_renderable(&self.preview_points())
    }

    /// Applies the editor text. Returns `false` (and changes nothing) when it
    /// does not hold at least two valid points.
    pub fn apply(&mut self) -> bool {
        if !self.can_apply() {
            return false;
        }
        self.replace_applied(self.editor_text.clone());
        true
    }

    pub fn load_sample(&mut self) {
        self.editor_text = SAMPLE_COORDINATES.to_string();
        self.replace_applied(SAMPLE_COORDINATES.to_string());
        self.status = "Loaded sample trajectory.".to_string();
    }

    pub fn begin_file_load(&mut self) {
        self.status = format!("Loading {}...", self.config.well_file);
    }

    /// Handles a completed default-file request.
    ///
    /// Failures and files with fewer than two valid points only update the
    /// status; the applied trajectory stays as it was.
    pub fn finish_file_load(&mut self, result: Result<String, LoadError>) -> LoadOutcome {
        let file = self.config.well_file.clone();
        let text = match result {
            Ok(text) => text.trim().to_string(),
            Err(_) => {
                self.status =
                    format!("Could not load {file} automatically. Paste coordinates or retry.");
                return LoadOutcome::Failed;
            }
        };

        let point_count = parse_coordinates_with(&text, self.config.parse).len();
        if point_count < foundation::MIN_RENDERABLE_POINTS {
            self.status =
                "Loaded file, but it does not contain at least two valid points.".to_string();
            return LoadOutcome::TooFewPoints { point_count };
        }

        self.editor_text = text.clone();
        self.replace_applied(text);
        self.status = format!("Loaded {point_count} points from {file}");
        LoadOutcome::Applied { point_count }
    }

    /// Applies a pointer event to the selection. Returns `true` on change.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        self.selection.revalidate(self.points.len());
        self.selection.handle(event)
    }

    /// Resolves a pointer ray against the markers; a miss clears the selection.
    pub fn pick(&mut self, ray: Ray) -> bool {
        let picked = self
            .geometry
            .as_ref()
            .and_then(|g| resolve_pick(ray, g.marker_positions(), g.marker_radius));
        self.selection.revalidate(self.points.len());
        self.selection.handle_pick(picked)
    }

    /// Selects the marker nearest to a render-space `position`, if one lies
    /// within the endpoint marker radius; anything farther clears the
    /// selection.
    pub fn pick_near(&mut self, position: Vec3) -> bool {
        let picked = self.geometry.as_ref().and_then(|g| {
            resolve_pick_nearest(position, g.marker_positions(), g.endpoint_radius)
        });
        self.selection.revalidate(self.points.len());
        self.selection.handle_pick(picked)
    }

    pub fn readout(&self) -> Option<DepthReadout> {
        let geometry = self.geometry.as_ref()?;
        self.selection.readout(&self.points, geometry)
    }

    /// Draws the applied trajectory, or the placeholder when it is not
    /// renderable.
    pub fn render<S: ViewerSurface + ?Sized>(&self, surface: &mut S) {
        let Some(geometry) = self.geometry.as_ref() else {
            surface.show_placeholder(PLACEHOLDER_MESSAGE);
            return;
        };
        let scene = RenderScene {
            points: &self.points,
            geometry,
            camera: CameraFrame::frame(geometry),
            selected: self.selection.selected_index(),
            readout: self.selection.readout(&self.points, geometry),
            hint: HINT_MESSAGE,
        };
        surface.draw(&scene);
    }

    fn replace_applied(&mut self, text: String) {
        self.points = parse_coordinates_with(&text, self.config.parse);
        self.geometry = build_geometry(&self.points, self.config.convention).ok();
        self.applied_text = text;
        self.selection.reset(self.points.len());
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
