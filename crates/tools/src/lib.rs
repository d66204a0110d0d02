//! Command-line helpers: trajectory loading and a plain-text viewer surface.

use std::fmt;
use std::path::Path;

use foundation::math::Vec3;
use scene::{LoadError, MarkerRole, RenderScene, SessionConfig, ViewerSession, ViewerSurface};
use tracing::{debug, info, warn};

/// Trajectory file `wellbore view` loads when no source is given.
pub const DEFAULT_DATA_PATH: &str = "data/well-1.csv";

/// Loads coordinate text from an `http(s)://` URL or a local path.
///
/// Non-success HTTP statuses are reported as [`LoadError::Status`].
pub async fn fetch_text(source: &str) -> Result<String, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source).await
    } else {
        read_path(Path::new(source)).await
    }
}

async fn fetch_url(url: &str) -> Result<String, LoadError> {
    debug!("fetching {url}");
    let resp = reqwest::get(url).await.map_err(|e| {
        warn!("request to {url} failed: {e}");
        LoadError::Transport(e.to_string())
    })?;
    let status = resp.status();
    if !status.is_success() {
        warn!("request to {url} returned {status}");
        return Err(LoadError::Status(status.as_u16()));
    }
    resp.text()
        .await
        .map_err(|e| LoadError::Transport(e.to_string()))
}

async fn read_path(path: &Path) -> Result<String, LoadError> {
    debug!("reading {}", path.display());
    tokio::fs::read_to_string(path).await.map_err(|e| {
        warn!("read {} failed: {e}", path.display());
        LoadError::Transport(format!("{}: {e}", path.display()))
    })
}

/// File name shown in status messages: the last path or URL segment, without
/// query or fragment.
pub fn source_label(source: &str) -> &str {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(source)
}

/// Opens a session on the built-in sample, then loads `source` over it.
///
/// A failed or too-short load leaves the sample applied and the reason in the
/// status line.
pub async fn open_session(mut config: SessionConfig, source: Option<&str>) -> ViewerSession {
    let Some(source) = source else {
        return ViewerSession::new(config);
    };
    config.well_file = source_label(source).to_string();
    let mut session = ViewerSession::new(config);
    session.begin_file_load();
    info!("{}", session.status());
    let outcome = session.finish_file_load(fetch_text(source).await);
    info!(?outcome, "{}", session.status());
    session
}

/// Parses `x,y,z`.
pub fn parse_vec3(raw: &str) -> Result<Vec3, String> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid vector {raw:?}: {e}"))?;
    match parts.as_slice() {
        [x, y, z] if parts.iter().all(|v| v.is_finite()) => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected three finite numbers x,y,z, got {raw:?}")),
    }
}

/// Renders scenes as a text report.
#[derive(Debug, Default)]
pub struct TextSurface {
    pub out: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.1}, {:.1}, {:.1})", v.x, v.y, v.z)
}

/// Text report of one frame.
struct SceneReport<'a, 'b>(&'b RenderScene<'a>);

impl fmt::Display for SceneReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        let g = scene.geometry;
        let cam = &scene.camera;

        writeln!(f, "convention: {}", g.convention)?;
        writeln!(f, "points: {}", scene.points.len())?;
        writeln!(
            f,
            "bounds: min {} max {}",
            fmt_vec(g.bounds.min),
            fmt_vec(g.bounds.max)
        )?;
        writeln!(f, "center: {}  span: {:.1}", fmt_vec(g.center()), g.span())?;
        writeln!(
            f,
            "markers: r={:.2} endpoints r={:.2} axes={:.1}",
            g.marker_radius, g.endpoint_radius, g.axis_length
        )?;
        writeln!(
            f,
            "camera: eye {} target {} fov {}",
            fmt_vec(cam.position),
            fmt_vec(cam.target),
            cam.fov_deg
        )?;

        for rp in &g.polyline {
            let tag = match rp.role {
                MarkerRole::Start => "start",
                MarkerRole::End => "end",
                MarkerRole::Interior => "",
            };
            let marker = if scene.selected == Some(rp.index) { "*" } else { " " };
            let md = scene.points.get(rp.index).map_or(f64::NAN, |p| p.z);
            writeln!(
                f,
                "{marker}{:>4} {} md={md:.1} {tag}",
                rp.index,
                fmt_vec(rp.position)
            )?;
        }

        match &scene.readout {
            Some(r) => writeln!(f, "{} at {}", r.label(), fmt_vec(r.anchor)),
            None => writeln!(f, "{}", scene.hint),
        }
    }
}

impl ViewerSurface for TextSurface {
    fn show_placeholder(&mut self, message: &str) {
        self.out.push_str(message);
        self.out.push('\n');
    }

    fn draw(&mut self, scene: &RenderScene<'_>) {
        self.out.push_str(&SceneReport(scene).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{TextSurface, fetch_text, open_session, parse_vec3, source_label};
    use foundation::math::Vec3;
    use scene::{
        LoadError, PLACEHOLDER_MESSAGE, PointerEvent, SAMPLE_COORDINATES, SessionConfig,
        ViewerSession, ViewerSurface,
    };
    use std::io::Write;

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vec3("1, 2,3").expect("vec"), Vec3::new(1.0, 2.0, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
        assert!(parse_vec3("1,2,inf").is_err());
    }

    #[test]
    fn text_surface_marks_selection_and_readout() {
        let mut session = ViewerSession::default();
        session.pointer(PointerEvent::Press(3));
        let mut surface = TextSurface::new();
        session.render(&mut surface);
        let text = surface.into_string();

        assert!(text.contains("convention: depth-down"));
        assert!(text.contains("points: 6"));
        assert!(text.contains("*   3 (350.0, 180.0, -720.0) md=720.0"));
        assert!(text.contains("MD: 720.0 ft at (350.0, 180.0, -720.0)"));
    }

    #[test]
    fn text_surface_shows_placeholder() {
        let mut surface = TextSurface::new();
        surface.show_placeholder(PLACEHOLDER_MESSAGE);
        assert_eq!(surface.into_string().trim(), PLACEHOLDER_MESSAGE);
    }

    #[tokio::test]
    async fn reads_local_files_and_reports_missing_ones() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "0,0,0\n1,1,10\n").expect("write");
        let text = fetch_text(file.path().to_str().expect("utf-8 path"))
            .await
            .expect("read");
        assert_eq!(text, "0,0,0\n1,1,10\n");

        let missing = fetch_text("/definitely/not/here/well-1.csv").await;
        assert!(matches!(missing, Err(LoadError::Transport(_))));
    }

    #[test]
    fn labels_sources_by_last_segment() {
        assert_eq!(source_label("data/well-1.csv"), "well-1.csv");
        assert_eq!(source_label("/srv/wells/alpha 2.txt"), "alpha 2.txt");
        assert_eq!(source_label(r"C:\wells\beta.csv"), "beta.csv");
        assert_eq!(
            source_label("https://example.com/files/gamma.csv?token=abc#top"),
            "gamma.csv"
        );
        assert_eq!(source_label("https://example.com/wells/"), "wells");
        assert_eq!(source_label("plain.csv"), "plain.csv");
    }

    #[tokio::test]
    async fn loaded_source_is_named_in_status() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("tempfile");
        write!(file, "0,0,0\n1,1,10\n").expect("write");
        let path = file.path().to_str().expect("utf-8 path");
        let name = file
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name")
            .to_string();

        let session = open_session(SessionConfig::default(), Some(path)).await;
        assert_eq!(session.points().len(), 2);
        assert_eq!(session.config().well_file, name);
        assert_eq!(session.status(), format!("Loaded 2 points from {name}"));
    }

    #[tokio::test]
    async fn missing_default_file_keeps_sample() {
        let session =
            open_session(SessionConfig::default(), Some("/definitely/not/here/well-1.csv")).await;
        assert_eq!(session.points().len(), 6);
        assert_eq!(session.applied_text(), SAMPLE_COORDINATES);
        assert_eq!(
            session.status(),
            "Could not load well-1.csv automatically. Paste coordinates or retry."
        );
    }

    #[tokio::test]
    async fn no_source_shows_sample_without_status() {
        let session = open_session(SessionConfig::default(), None).await;
        assert_eq!(session.points().len(), 6);
        assert_eq!(session.status(), "");
    }
}
