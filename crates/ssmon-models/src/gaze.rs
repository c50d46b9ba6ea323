//! Gaze direction vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse gaze direction for one frame.
///
/// Horizontal directions dominate vertical ones when both are off-center.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum GazeDirection {
    #[default]
    Center,
    Left,
    Right,
    Up,
    Down,
}

impl GazeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GazeDirection::Center => "CENTER",
            GazeDirection::Left => "LEFT",
            GazeDirection::Right => "RIGHT",
            GazeDirection::Up => "UP",
            GazeDirection::Down => "DOWN",
        }
    }

    pub fn is_center(&self) -> bool {
        matches!(self, GazeDirection::Center)
    }
}

impl fmt::Display for GazeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&GazeDirection::Center).unwrap(),
            "\"CENTER\""
        );
        assert_eq!(
            serde_json::to_string(&GazeDirection::Left).unwrap(),
            "\"LEFT\""
        );
    }

    #[test]
    fn test_default_is_center() {
        assert!(GazeDirection::default().is_center());
    }
}
