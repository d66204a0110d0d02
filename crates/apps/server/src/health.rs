use axum::Json;
use axum::extract::State;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::AppState;
use crate::config::SERVICE_NAME;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub ok: bool,
    pub service: &'static str,
    pub supabase_configured: bool,
    pub timestamp: String,
}

pub async fn get_health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        ok: true,
        service: SERVICE_NAME,
        supabase_configured: state.supabase_configured,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
