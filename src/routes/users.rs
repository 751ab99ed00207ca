use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{app::AppState, error::AppError, models::User};

#[derive(Debug, Deserialize)]
pub struct UsernameParams {
    #[serde(default)]
    pub username: Option<String>,
}

pub fn router(state: AppState) -> Router<()> {
    Router::new()
        .route("/api/users/by-username", get(self::get::by_username))
        .with_state(state)
}

mod get {
    use super::*;

    pub async fn by_username(
        State(state): State<AppState>,
        params: Result<Query<UsernameParams>, QueryRejection>,
    ) -> Result<Json<User>, AppError> {
        let Query(UsernameParams { username }) = params.map_err(|rejection| {
            tracing::debug!(error = %rejection, "rejected query string");
            AppError::validation("invalid query string")
        })?;

        // validated before any lookup; an empty value counts as missing
        let username = username
            .filter(|username| !username.is_empty())
            .ok_or_else(|| AppError::validation("username is required"))?;

        let user = state
            .store
            .get_user_by_username(&username)
            .await
            .map_err(AppError::internal("users/by-username"))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(Json(user))
    }
}
