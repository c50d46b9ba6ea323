//! WebSocket message schemas.
//!
//! These envelopes maintain compatibility with the existing browser clients:
//! every outbound message is an object tagged with a snake_case `type` field.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::FrameAnalysis;
use crate::telemetry::TelemetryRecord;

/// Inbound message from a student client.
///
/// Both fields are optional: a message without an image is a keep-alive or
/// name update, and is never forwarded or analyzed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: Option<String>,
    /// Base64 frame, usually prefixed as a data URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Teacher connectivity status broadcast to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceStatus::Online => write!(f, "ONLINE"),
            PresenceStatus::Offline => write!(f, "OFFLINE"),
        }
    }
}

/// Server → student events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudentEvent {
    /// Per-frame analysis result for this student
    Feedback { payload: FrameAnalysis },
    /// Current roster of connected student ids
    PeerUpdate { peers: Vec<String> },
    /// Teacher connectivity change
    TeacherStatus { status: PresenceStatus },
}

impl StudentEvent {
    pub fn feedback(payload: FrameAnalysis) -> Self {
        StudentEvent::Feedback { payload }
    }

    pub fn peer_update(peers: Vec<String>) -> Self {
        StudentEvent::PeerUpdate { peers }
    }

    pub fn teacher_status(status: PresenceStatus) -> Self {
        StudentEvent::TeacherStatus { status }
    }
}

/// Server → teacher events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TeacherEvent {
    /// Raw frame echoed from a student, still base64 encoded
    StudentFrame {
        #[serde(rename = "studentId")]
        student_id: String,
        image: String,
    },
    /// Derived telemetry for one student frame (or a synthetic offline row)
    TelemetryUpdate { data: TelemetryRecord },
}

impl TeacherEvent {
    pub fn student_frame(student_id: impl Into<String>, image: impl Into<String>) -> Self {
        TeacherEvent::StudentFrame {
            student_id: student_id.into(),
            image: image.into(),
        }
    }

    pub fn telemetry(data: TelemetryRecord) -> Self {
        TeacherEvent::TelemetryUpdate { data }
    }
}
