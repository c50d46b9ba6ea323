//! API routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{health, root};
use crate::middleware::cors_layer;
use crate::state::AppState;
use crate::ws::{ws_student, ws_teacher};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let ws_routes = Router::new()
        .route("/ws/student/:student_id", get(ws_student))
        .route("/ws/teacher/:class_id", get(ws_teacher));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(ws_routes)
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
