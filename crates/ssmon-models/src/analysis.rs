//! Per-frame analysis results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gaze::GazeDirection;
use crate::state::SubjectState;

/// Geometry features echoed back to the student client alongside the state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureSnapshot {
    /// Inter-brow distance over face width
    pub brow: f64,
    /// Vertical lip-to-nose offset over face width
    pub smile_up: f64,
    /// Absolute head roll in degrees
    pub roll: f64,
}

/// Result of analyzing one frame.
///
/// Serialized verbatim as the `payload` of the student feedback message.
/// `label` and `features` are absent for the degenerate no-frame result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameAnalysis {
    pub state: SubjectState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub gaze: GazeDirection,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSnapshot>,
}

impl FrameAnalysis {
    /// Build a classified result. The coarse label is derived from the state.
    pub fn new(
        state: SubjectState,
        gaze: GazeDirection,
        score: f64,
        features: Option<FeatureSnapshot>,
    ) -> Self {
        Self {
            state,
            label: Some(state.ui_label().to_string()),
            gaze,
            score,
            features,
        }
    }

    /// Degenerate result for a frame whose bytes did not decode.
    pub fn no_frame() -> Self {
        Self {
            state: SubjectState::NoFrame,
            label: None,
            gaze: GazeDirection::Center,
            score: 0.0,
            features: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frame_payload_shape() {
        let json = serde_json::to_value(FrameAnalysis::no_frame()).unwrap();
        assert_eq!(json["state"], "No Frame");
        assert_eq!(json["score"], 0.0);
        assert_eq!(json["gaze"], "CENTER");
        assert!(json.get("label").is_none());
        assert!(json.get("features").is_none());
    }

    #[test]
    fn test_classified_payload_carries_label_and_features() {
        let analysis = FrameAnalysis::new(
            SubjectState::Confused,
            GazeDirection::Center,
            0.12,
            Some(FeatureSnapshot {
                brow: 0.12,
                smile_up: 0.1,
                roll: 2.5,
            }),
        );
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["state"], "Confused");
        assert_eq!(json["label"], "Confused");
        assert_eq!(json["features"]["brow"], 0.12);
    }

    #[test]
    fn test_alert_label_for_looking_away() {
        let analysis = FrameAnalysis::new(
            SubjectState::LookingAway,
            GazeDirection::Left,
            0.0,
            None,
        );
        assert_eq!(analysis.label.as_deref(), Some("Alert"));
    }
}
