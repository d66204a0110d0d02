use clap::{Parser, Subcommand};
use foundation::math::Vec3;
use formats::{ParseOptions, RejectedLine, parse_report, to_coordinate_text};
use scene::picking::Ray;
use scene::{DepthConvention, PointerEvent, SessionConfig, build_geometry};
use serde::Serialize;
use tools::{DEFAULT_DATA_PATH, TextSurface, fetch_text, open_session, parse_vec3};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Wellbore trajectory inspection tools")]
struct Args {
    /// Depth axis convention: depth-down (MD renders downward) or raw
    #[arg(long, default_value = "depth-down")]
    convention: DepthConvention,

    /// Do not strip wrapping double quotes from lines and fields
    #[arg(long)]
    no_strip_quotes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a coordinate file and report rejected lines, bounds and sizing
    Inspect {
        /// Path or http(s) URL of an x,y,z text file
        source: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a coordinate file as clean x,y,z lines
    Normalize {
        /// Path or http(s) URL of an x,y,z text file
        source: String,
    },

    /// Load a trajectory into a viewer session and print the framed scene
    View {
        /// Path or http(s) URL to load (default: data/well-1.csv)
        source: Option<String>,

        /// Show the built-in sample without loading the default file
        #[arg(long, conflicts_with = "source")]
        no_default_load: bool,

        /// Hover the marker with this index
        #[arg(long)]
        hover: Option<usize>,

        /// Pick ray origin x,y,z (render space)
        #[arg(long, requires = "pick_dir", allow_hyphen_values = true)]
        pick_origin: Option<String>,

        /// Pick ray direction x,y,z
        #[arg(long, requires = "pick_origin", allow_hyphen_values = true)]
        pick_dir: Option<String>,

        /// Select the marker nearest to this x,y,z (render space)
        #[arg(long, allow_hyphen_values = true)]
        pick_at: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct InspectReport {
    point_count: usize,
    rejected: Vec<RejectedLine>,
    renderable: bool,
    convention: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds_min: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds_max: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    center: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint_radius: Option<f64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main(args: Args) -> Result<(), String> {
    let parse = ParseOptions {
        strip_quotes: !args.no_strip_quotes,
    };

    match args.command {
        Command::Inspect { source, json } => cmd_inspect(&source, json, parse, args.convention).await,
        Command::Normalize { source } => cmd_normalize(&source, parse).await,
        Command::View {
            source,
            no_default_load,
            hover,
            pick_origin,
            pick_dir,
            pick_at,
        } => {
            let pick = match (pick_origin, pick_dir) {
                (Some(o), Some(d)) => Some(Ray::new(parse_vec3(&o)?, parse_vec3(&d)?)),
                _ => None,
            };
            let near = pick_at.as_deref().map(parse_vec3).transpose()?;
            let source = match source {
                Some(source) => Some(source),
                None if no_default_load => None,
                None => Some(DEFAULT_DATA_PATH.to_string()),
            };
            let cfg = SessionConfig {
                convention: args.convention,
                parse,
                ..SessionConfig::default()
            };
            cmd_view(cfg, source.as_deref(), hover, pick, near).await
        }
    }
}

async fn cmd_inspect(
    source: &str,
    json: bool,
    parse: ParseOptions,
    convention: DepthConvention,
) -> Result<(), String> {
    let text = fetch_text(source).await.map_err(|e| e.to_string())?;
    let report = parse_report(&text, parse);
    let geometry = build_geometry(&report.points, convention).ok();

    let out = InspectReport {
        point_count: report.points.len(),
        renderable: geometry.is_some(),
        convention: convention.to_string(),
        bounds_min: geometry.as_ref().map(|g| g.bounds.min.to_array()),
        bounds_max: geometry.as_ref().map(|g| g.bounds.max.to_array()),
        center: geometry.as_ref().map(|g| g.center().to_array()),
        span: geometry.as_ref().map(|g| g.span()),
        marker_radius: geometry.as_ref().map(|g| g.marker_radius),
        endpoint_radius: geometry.as_ref().map(|g| g.endpoint_radius),
        rejected: report.rejected,
    };

    if json {
        let payload = serde_json::to_string_pretty(&out).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
        return Ok(());
    }

    println!("points: {}", out.point_count);
    for r in &out.rejected {
        println!("  line {}: {} ({:?})", r.line_number, r.reason, r.raw);
    }
    match (out.bounds_min, out.bounds_max, out.span) {
        (Some(min), Some(max), Some(span)) => {
            println!("bounds ({}): min {min:?} max {max:?}", out.convention);
            println!("span: {span}");
        }
        _ => println!("not renderable: at least two valid points are required"),
    }
    Ok(())
}

async fn cmd_normalize(source: &str, parse: ParseOptions) -> Result<(), String> {
    let text = fetch_text(source).await.map_err(|e| e.to_string())?;
    let report = parse_report(&text, parse);
    if !report.rejected.is_empty() {
        info!("dropped {} malformed line(s)", report.rejected.len());
    }
    println!("{}", to_coordinate_text(&report.points));
    Ok(())
}

async fn cmd_view(
    cfg: SessionConfig,
    source: Option<&str>,
    hover: Option<usize>,
    pick: Option<Ray>,
    near: Option<Vec3>,
) -> Result<(), String> {
    let mut session = open_session(cfg, source).await;

    if let Some(index) = hover {
        session.pointer(PointerEvent::Enter(index));
    }
    if let Some(ray) = pick {
        session.pick(ray);
    }
    if let Some(position) = near {
        session.pick_near(position);
    }

    println!("{}", session.config().well_name);
    if !session.status().is_empty() {
        println!("{}", session.status());
    }
    let mut surface = TextSurface::new();
    session.render(&mut surface);
    print!("{}", surface.into_string());
    Ok(())
}
