//! Per-frame subject state vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete state derived from one analyzed frame.
///
/// Exactly one state is emitted per frame. The serialized form uses the
/// display strings the frontend renders directly ("No Face", "Looking Away",
/// ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SubjectState {
    /// Frame bytes could not be decoded
    #[serde(rename = "No Frame")]
    NoFrame,
    /// Detector found no landmarks
    #[serde(rename = "No Face")]
    NoFace,
    /// Detector found more than one face
    #[serde(rename = "Multiple Faces")]
    MultipleFaces,
    /// Sustained non-center gaze past the configured timeout
    #[serde(rename = "Looking Away")]
    LookingAway,
    Confused,
    Happy,
    Focused,
}

impl SubjectState {
    /// Raw display string, as shown to the student client.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectState::NoFrame => "No Frame",
            SubjectState::NoFace => "No Face",
            SubjectState::MultipleFaces => "Multiple Faces",
            SubjectState::LookingAway => "Looking Away",
            SubjectState::Confused => "Confused",
            SubjectState::Happy => "Happy",
            SubjectState::Focused => "Focused",
        }
    }

    /// Coarse UI label. Integrity violations collapse to "Alert".
    pub fn ui_label(&self) -> &'static str {
        match self {
            SubjectState::MultipleFaces | SubjectState::LookingAway => "Alert",
            other => other.as_str(),
        }
    }

    /// Normalized state name used in teacher telemetry.
    ///
    /// Collapses the internal classification granularity into the coarser
    /// vocabulary the dashboard consumes.
    pub fn telemetry_state(&self) -> &'static str {
        match self {
            SubjectState::NoFace | SubjectState::MultipleFaces => "NOT_PRESENT",
            SubjectState::LookingAway => "DISTRACTED",
            SubjectState::Happy => "ENGAGED",
            SubjectState::Confused => "CONFUSED",
            SubjectState::Focused => "FOCUSED",
            SubjectState::NoFrame => "NO FRAME",
        }
    }
}

impl fmt::Display for SubjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_display() {
        let json = serde_json::to_string(&SubjectState::LookingAway).unwrap();
        assert_eq!(json, "\"Looking Away\"");

        let state: SubjectState = serde_json::from_str("\"Multiple Faces\"").unwrap();
        assert_eq!(state, SubjectState::MultipleFaces);
    }

    #[test]
    fn test_telemetry_normalization() {
        assert_eq!(SubjectState::NoFace.telemetry_state(), "NOT_PRESENT");
        assert_eq!(SubjectState::MultipleFaces.telemetry_state(), "NOT_PRESENT");
        assert_eq!(SubjectState::LookingAway.telemetry_state(), "DISTRACTED");
        assert_eq!(SubjectState::Happy.telemetry_state(), "ENGAGED");
        assert_eq!(SubjectState::Confused.telemetry_state(), "CONFUSED");
        assert_eq!(SubjectState::Focused.telemetry_state(), "FOCUSED");
        assert_eq!(SubjectState::NoFrame.telemetry_state(), "NO FRAME");
    }

    #[test]
    fn test_ui_label_collapses_alerts() {
        assert_eq!(SubjectState::MultipleFaces.ui_label(), "Alert");
        assert_eq!(SubjectState::LookingAway.ui_label(), "Alert");
        assert_eq!(SubjectState::Confused.ui_label(), "Confused");
        assert_eq!(SubjectState::NoFace.ui_label(), "No Face");
    }
}
