//! `POST /api/well/preview`: point count and raw-z bounds for a point list.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use foundation::{BoundingVolume, MIN_RENDERABLE_POINTS};
use formats::{PointsJsonError, points_from_json};
use scene::{DepthConvention, compute_bounds};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

pub const TOO_FEW_POINTS_MESSAGE: &str =
    "Request body must include points with at least two coordinate objects.";
pub const NON_FINITE_MESSAGE: &str = "Each point must include finite numeric x, y, z values.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl From<BoundingVolume> for Bounds {
    fn from(b: BoundingVolume) -> Self {
        Self {
            min_x: b.min.x,
            min_y: b.min.y,
            min_z: b.min.z,
            max_x: b.max.x,
            max_y: b.max.y,
            max_z: b.max.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub point_count: usize,
    pub bounds: Bounds,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

/// Validates a request body and computes the preview.
///
/// A body that is not JSON is treated as one without `points`. Numbers too
/// large for `f64` still parse and are rejected as non-finite.
pub fn preview(body: &[u8]) -> Result<PreviewResponse, PointsJsonError> {
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let points = points_from_json(value.get("points"), MIN_RENDERABLE_POINTS)?;
    let bounds = compute_bounds(&points, DepthConvention::Raw);
    Ok(PreviewResponse {
        point_count: points.len(),
        bounds: bounds.into(),
    })
}

pub async fn post_preview(body: Bytes) -> Response {
    match preview(&body) {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(err) => {
            debug!("preview rejected: {err}");
            let message = match err {
                PointsJsonError::TooFewPoints { .. } => TOO_FEW_POINTS_MESSAGE,
                PointsJsonError::NonFinite { .. } => NON_FINITE_MESSAGE,
            };
            api_error(StatusCode::BAD_REQUEST, message).into_response()
        }
    }
}
