//! Shared data models for the Smartsession monitoring backend.
//!
//! This crate provides Serde-serializable types for:
//! - Per-frame subject states and gaze directions
//! - Frame analysis results (the student feedback payload)
//! - Teacher-facing telemetry records
//! - WebSocket message schemas for both connection roles

pub mod analysis;
pub mod gaze;
pub mod state;
pub mod telemetry;
pub mod ws;

// Re-export common types
pub use analysis::{FeatureSnapshot, FrameAnalysis};
pub use gaze::GazeDirection;
pub use state::SubjectState;
pub use telemetry::TelemetryRecord;
pub use ws::{PresenceStatus, StudentEvent, StudentPayload, TeacherEvent};
