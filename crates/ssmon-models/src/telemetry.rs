//! Teacher-facing telemetry records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::FrameAnalysis;
use crate::gaze::GazeDirection;
use crate::state::SubjectState;

/// Normalized state name for a disconnected student.
pub const OFFLINE_STATE: &str = "OFFLINE";

/// One telemetry row on the teacher dashboard.
///
/// `state` carries the normalized vocabulary (`NOT_PRESENT`, `DISTRACTED`,
/// `ENGAGED`, ...) while `raw_state` keeps the fine-grained classification.
/// The synthetic offline record omits `raw_state`, `gaze` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TelemetryRecord {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub name: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_state: Option<String>,
    pub confusion_index: f64,
    pub engagement_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze: Option<GazeDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl TelemetryRecord {
    /// Derive a telemetry record from a frame analysis.
    ///
    /// The analysis score feeds exactly one of the two indices: confusion
    /// when the state is `Confused`, engagement when `Focused`/`Happy`.
    /// `LookingAway` carries the fixed `-1` engagement sentinel.
    pub fn from_analysis(
        student_id: impl Into<String>,
        name: impl Into<String>,
        analysis: &FrameAnalysis,
        timestamp: f64,
    ) -> Self {
        let (confusion_index, engagement_score) = match analysis.state {
            SubjectState::Confused => (analysis.score, 0.0),
            SubjectState::Focused | SubjectState::Happy => (0.0, analysis.score),
            SubjectState::LookingAway => (0.0, -1.0),
            _ => (0.0, 0.0),
        };

        Self {
            student_id: student_id.into(),
            name: name.into(),
            state: analysis.state.telemetry_state().to_string(),
            raw_state: Some(analysis.state.as_str().to_string()),
            confusion_index,
            engagement_score,
            gaze: Some(analysis.gaze),
            timestamp: Some(timestamp),
        }
    }

    /// Synthetic record broadcast when a student disconnects.
    pub fn offline(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            name: "Unknown".to_string(),
            state: OFFLINE_STATE.to_string(),
            raw_state: None,
            confusion_index: 0.0,
            engagement_score: 0.0,
            gaze: None,
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confused_feeds_confusion_index() {
        let analysis = FrameAnalysis::new(SubjectState::Confused, GazeDirection::Center, 0.11, None);
        let record = TelemetryRecord::from_analysis("s1", "Alice", &analysis, 1000.0);
        assert_eq!(record.state, "CONFUSED");
        assert_eq!(record.raw_state.as_deref(), Some("Confused"));
        assert_eq!(record.confusion_index, 0.11);
        assert_eq!(record.engagement_score, 0.0);
    }

    #[test]
    fn test_focused_feeds_engagement_score() {
        let analysis = FrameAnalysis::new(SubjectState::Focused, GazeDirection::Center, 0.2, None);
        let record = TelemetryRecord::from_analysis("s1", "Alice", &analysis, 1000.0);
        assert_eq!(record.state, "FOCUSED");
        assert_eq!(record.engagement_score, 0.2);
        assert_eq!(record.confusion_index, 0.0);
    }

    #[test]
    fn test_looking_away_engagement_sentinel() {
        let analysis = FrameAnalysis::new(SubjectState::LookingAway, GazeDirection::Left, 0.0, None);
        let record = TelemetryRecord::from_analysis("s1", "Alice", &analysis, 1000.0);
        assert_eq!(record.state, "DISTRACTED");
        assert_eq!(record.engagement_score, -1.0);
        assert_eq!(record.confusion_index, 0.0);
    }

    #[test]
    fn test_offline_record_shape() {
        let json = serde_json::to_value(TelemetryRecord::offline("s1")).unwrap();
        assert_eq!(json["studentId"], "s1");
        assert_eq!(json["state"], "OFFLINE");
        assert_eq!(json["name"], "Unknown");
        assert_eq!(json["engagement_score"], 0.0);
        assert_eq!(json["confusion_index"], 0.0);
        assert!(json.get("raw_state").is_none());
        assert!(json.get("gaze").is_none());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_camel_case_student_id() {
        let analysis = FrameAnalysis::no_frame();
        let json = serde_json::to_value(TelemetryRecord::from_analysis(
            "s1", "Alice", &analysis, 12.5,
        ))
        .unwrap();
        assert_eq!(json["studentId"], "s1");
        assert_eq!(json["state"], "NO FRAME");
        assert_eq!(json["timestamp"], 12.5);
    }
}
