//! Monitor threshold configuration.

/// Tunable thresholds for the state classifier.
///
/// Defaults match the values the classifier was calibrated against; every
/// field can be overridden through the environment.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Seconds of sustained non-center gaze before flagging "looking away"
    pub gaze_timeout_secs: f64,
    /// Capacity of the majority-vote prediction buffer
    pub smoothing_window: usize,
    /// Brow ratio below which the rule-based check reports confusion
    pub brow_confusion_ratio: f64,
    /// Very tight brow ratio that always reports confusion
    pub brow_confusion_override: f64,
    /// Minimum mouth-width ratio for the happiness rule
    pub happy_mouth_width: f64,
    /// Minimum mouth-open ratio for the happiness rule
    pub happy_mouth_open: f64,
    /// Smile offset below which the happiness rule fires on its own
    pub happy_smile_up: f64,
    /// Horizontal iris ratio below which gaze reads RIGHT
    pub gaze_right_ratio: f64,
    /// Horizontal iris ratio above which gaze reads LEFT
    pub gaze_left_ratio: f64,
    /// Vertical iris ratio below which gaze reads UP
    pub gaze_up_ratio: f64,
    /// Vertical iris ratio above which gaze reads DOWN
    pub gaze_down_ratio: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            gaze_timeout_secs: 4.5,
            smoothing_window: 7,
            brow_confusion_ratio: 0.15,
            brow_confusion_override: 0.05,
            happy_mouth_width: 0.33,
            happy_mouth_open: 0.02,
            happy_smile_up: -0.3,
            gaze_right_ratio: 0.2,
            gaze_left_ratio: 0.8,
            gaze_up_ratio: 0.35,
            gaze_down_ratio: 0.65,
        }
    }
}

impl MonitorConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gaze_timeout_secs: env_f64("GAZE_TIMEOUT_SECS", defaults.gaze_timeout_secs),
            smoothing_window: std::env::var("SMOOTHING_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.smoothing_window),
            brow_confusion_ratio: env_f64("BROW_CONFUSION_RATIO", defaults.brow_confusion_ratio),
            brow_confusion_override: env_f64(
                "BROW_CONFUSION_OVERRIDE",
                defaults.brow_confusion_override,
            ),
            happy_mouth_width: env_f64("HAPPY_MOUTH_WIDTH", defaults.happy_mouth_width),
            happy_mouth_open: env_f64("HAPPY_MOUTH_OPEN", defaults.happy_mouth_open),
            happy_smile_up: env_f64("HAPPY_SMILE_UP", defaults.happy_smile_up),
            gaze_right_ratio: env_f64("GAZE_RIGHT_RATIO", defaults.gaze_right_ratio),
            gaze_left_ratio: env_f64("GAZE_LEFT_RATIO", defaults.gaze_left_ratio),
            gaze_up_ratio: env_f64("GAZE_UP_RATIO", defaults.gaze_up_ratio),
            gaze_down_ratio: env_f64("GAZE_DOWN_RATIO", defaults.gaze_down_ratio),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
