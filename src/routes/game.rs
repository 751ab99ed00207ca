use std::convert::Infallible;

use askama::Template;
use async_stream::try_stream;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        IntoResponse,
    },
    routing::get,
    Json, Router,
};
use futures_util::stream::Stream;
use http::HeaderValue;
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    app::AppState,
    error::AppError,
    models::ActivityType,
    rooms::{utils::create_fragments_event, RoomTemplate},
    templates::{GameTemplate, NotFoundTemplate, RoomContentTemplate, RoomErrorTemplate},
};

const FRAGMENT_FALLBACK: &str =
    "<div id='room' class='room room-error'><p class='error-message'>Something went wrong</p></div>";

#[derive(Debug, Deserialize)]
pub struct RoomParams {
    pub room: String,
}

pub fn router(state: AppState) -> Router<()> {
    let content_router = Router::new()
        .route("/content", get(self::get::room_content))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ));

    Router::new()
        .route("/api/game/activity-types", get(self::get::activity_types))
        .route("/api/game/rooms", get(self::get::room_names))
        .route("/api/game/rooms/:room", get(self::get::room_template))
        .route("/game", get(self::get::default_room_page))
        .route("/game/:room", get(self::get::room_page))
        .nest("/game/:room", content_router)
        .with_state(state)
}

mod get {
    use super::*;

    pub async fn activity_types(
        State(state): State<AppState>,
    ) -> Result<Json<Vec<ActivityType>>, AppError> {
        let activity_types = state
            .store
            .get_activity_types()
            .await
            .map_err(AppError::internal("game/activity-types"))?;

        Ok(Json(activity_types))
    }

    pub async fn room_names(State(state): State<AppState>) -> Json<Vec<String>> {
        Json(state.catalog.names())
    }

    pub async fn room_template(
        State(state): State<AppState>,
        Path(RoomParams { room }): Path<RoomParams>,
    ) -> Result<Json<RoomTemplate>, AppError> {
        state
            .catalog
            .get(&room)
            .cloned()
            .map(Json)
            .ok_or_else(|| AppError::not_found("Room not found"))
    }

    pub async fn default_room_page(State(state): State<AppState>) -> impl IntoResponse {
        let room = state.config.default_room.clone();
        render_shell(&state, room)
    }

    pub async fn room_page(
        State(state): State<AppState>,
        Path(RoomParams { room }): Path<RoomParams>,
    ) -> impl IntoResponse {
        render_shell(&state, room)
    }

    /// Streams the rendered room into the shell's placeholder, then ends.
    pub async fn room_content(
        State(state): State<AppState>,
        Path(RoomParams { room }): Path<RoomParams>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        let stream = try_stream! {
            let fragment = render_room_content(&state, &room).await;

            yield Event::default()
                .event("datastar-merge-fragments")
                .data(create_fragments_event(&fragment));
        };

        Sse::new(stream)
    }
}

fn render_shell(state: &AppState, room: String) -> axum::response::Response {
    if !state.catalog.contains(&room) {
        return (StatusCode::NOT_FOUND, NotFoundTemplate { room_name: room }).into_response();
    }

    GameTemplate {
        service: state.config.service_name.clone(),
        room_name: room,
    }
    .into_response()
}

/// Resolves everything the room needs and renders it, or an error fragment.
async fn render_room_content(state: &AppState, room: &str) -> String {
    let Some(template) = state.catalog.get(room) else {
        return render_fragment(&RoomErrorTemplate {
            message: "Room not found".to_string(),
        });
    };

    let activities = match state.store.get_activity_types().await {
        Ok(activities) => activities,
        Err(e) => {
            tracing::error!(context = "game/content", room, error = %e, "failed to load room data");
            return render_fragment(&RoomErrorTemplate {
                message: "Unable to load the room right now".to_string(),
            });
        }
    };

    tracing::debug!(room, items = template.items.len(), "rendering room content");
    render_fragment(&RoomContentTemplate::new(
        room,
        template,
        state.catalog.work_room(),
        activities,
    ))
}

fn render_fragment(template: &impl Template) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to render fragment");
        FRAGMENT_FALLBACK.to_string()
    })
}
