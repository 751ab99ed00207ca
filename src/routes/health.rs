use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub timestamp: String,
}

pub fn router(state: AppState) -> Router<()> {
    Router::new()
        .route("/api/health", get(self::get::health))
        .with_state(state)
}

mod get {
    use super::*;

    // liveness only, the datastore is never touched here
    pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
        Json(HealthResponse {
            ok: true,
            service: state.config.service_name.clone(),
            timestamp: now_rfc3339(),
        })
    }
}

fn now_rfc3339() -> String {
    // only fails for years outside 0..=9999 or offsets with seconds, never for UTC now
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("current UTC time formats as RFC 3339")
}
