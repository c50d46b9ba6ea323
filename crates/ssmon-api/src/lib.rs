//! Axum HTTP/WS server for live session monitoring.
//!
//! This crate provides:
//! - The session registry / broadcast manager
//! - WebSocket endpoints for student and teacher sessions
//! - Health endpoints and CORS

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod registry;
pub mod routes;
pub mod state;
pub mod ws;

pub use config::ApiConfig;
pub use registry::{Registry, RegistryError};
pub use routes::create_router;
pub use state::AppState;
pub use ws::{process_student_message, MessageOutcome};
