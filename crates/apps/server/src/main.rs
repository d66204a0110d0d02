mod config;
mod health;
mod preview;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    supabase_configured: bool,
}

pub(crate) fn app(cfg: &ServerConfig) -> Router {
    let state = AppState {
        supabase_configured: cfg.supabase_configured,
    };

    Router::new()
        .route("/health", get(health::get_health))
        .route("/api/well/preview", post(preview::post_preview))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(cors_layer(cfg))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(cfg: &ServerConfig) -> CorsLayer {
    let origin = match &cfg.cors_origins {
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(err) => {
                        warn!("ignoring invalid CORS origin {o:?}: {err}");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = ServerConfig::from_env();
    let addr = match cfg.addr() {
        Ok(addr) => addr,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!(
        supabase_configured = cfg.supabase_configured,
        "wellbore profile API listening on http://{addr}"
    );
    if let Err(err) = axum::serve(listener, app(&cfg)).await {
        error!("server error: {err}");
        std::process::exit(1);
    }
}
