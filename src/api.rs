//! HTTP endpoints and router assembly.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::protocol::RoomStatus;
use crate::state::AppState;
use crate::types::RoomCode;
use crate::ws;

/// Look up a room before connecting to it.
///
/// GET /api/rooms/{code}
pub async fn room_status(
    Path(code): Path<RoomCode>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomStatus>, StatusCode> {
    let handle = state.get_room(code).await.ok_or(StatusCode::NOT_FOUND)?;
    let status = handle.snapshot().await.status();
    Ok(Json(status))
}

/// Build the full application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/api/rooms/{code}", get(room_status))
        .route("/ws/new/{nick}", get(ws::ws_create_handler))
        .route("/ws/{code}/{nick}", get(ws::ws_join_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
