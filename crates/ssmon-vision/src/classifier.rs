//! Per-frame state decision.
//!
//! Ordered, first-match evaluation: integrity checks, gaze hysteresis, the
//! smoothed model verdict, the rule-based confusion fallback, the happiness
//! rule, then Focused.

use std::sync::Arc;

use ssmon_models::{FrameAnalysis, GazeDirection, SubjectState};

use crate::config::MonitorConfig;
use crate::features::{self, FeatureVector};
use crate::landmarks::LandmarkSet;
use crate::smoothing::PredictionBuffer;

/// Trained confusion model boundary.
pub trait ConfusionModel: Send + Sync {
    /// `true` when the model reads the feature vector as confused.
    fn predict(&self, features: &FeatureVector) -> bool;
}

/// State decision for one subject.
///
/// Owns the temporal state the decision depends on: the look-away timer and
/// the prediction smoothing buffer.
pub struct StateClassifier {
    config: MonitorConfig,
    model: Option<Arc<dyn ConfusionModel>>,
    predictions: PredictionBuffer,
    look_away_since: Option<f64>,
}

impl StateClassifier {
    pub fn new(config: MonitorConfig, model: Option<Arc<dyn ConfusionModel>>) -> Self {
        let predictions = PredictionBuffer::new(config.smoothing_window);
        Self {
            config,
            model,
            predictions,
            look_away_since: None,
        }
    }

    /// Classify one frame's detections. `now_secs` is the frame's wall-clock
    /// arrival time, used only for the look-away timer.
    pub fn classify(&mut self, faces: &[LandmarkSet], now_secs: f64) -> FrameAnalysis {
        // Integrity checks
        if faces.is_empty() {
            return FrameAnalysis::new(SubjectState::NoFace, GazeDirection::Center, 0.0, None);
        }
        if faces.len() > 1 {
            return FrameAnalysis::new(
                SubjectState::MultipleFaces,
                GazeDirection::Center,
                0.0,
                None,
            );
        }
        let lm = &faces[0];

        // Gaze hysteresis: a transient shift keeps evaluating the remaining
        // rules; only a shift sustained past the timeout flags the frame.
        let gaze = features::gaze(lm, &self.config);
        if !gaze.is_center() {
            match self.look_away_since {
                None => self.look_away_since = Some(now_secs),
                Some(start) if now_secs - start > self.config.gaze_timeout_secs => {
                    return FrameAnalysis::new(SubjectState::LookingAway, gaze, 0.0, None);
                }
                Some(_) => {}
            }
        } else {
            self.look_away_since = None;
        }

        let fv = features::extract(lm);
        let snapshot = Some(fv.snapshot());

        // Model verdict first, smoothed over the recent window
        if let Some(model) = &self.model {
            self.predictions.push(model.predict(&fv));
            if self.predictions.majority() {
                return FrameAnalysis::new(SubjectState::Confused, gaze, fv.brow, snapshot);
            }
        }

        // Rule-based fallback; the ratio is checked against both thresholds
        let (rule_confused, ratio) = features::brow_confusion(lm, &self.config);
        if rule_confused || ratio < self.config.brow_confusion_override {
            return FrameAnalysis::new(SubjectState::Confused, gaze, fv.brow, snapshot);
        }

        if features::is_happy(lm, &self.config) {
            return FrameAnalysis::new(SubjectState::Happy, gaze, fv.brow, snapshot);
        }

        FrameAnalysis::new(SubjectState::Focused, gaze, fv.brow, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{index, Point};
    use crate::testutil::{confused_face, gaze_right_face, happy_face, neutral_face, neutral_points};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct Always(bool);

    impl ConfusionModel for Always {
        fn predict(&self, _features: &FeatureVector) -> bool {
            self.0
        }
    }

    /// Replays a fixed prediction script, then reports not-confused.
    struct Scripted(Mutex<VecDeque<bool>>);

    impl Scripted {
        fn new(script: &[bool]) -> Self {
            Self(Mutex::new(script.iter().copied().collect()))
        }
    }

    impl ConfusionModel for Scripted {
        fn predict(&self, _features: &FeatureVector) -> bool {
            self.0.lock().unwrap().pop_front().unwrap_or(false)
        }
    }

    fn rule_only() -> StateClassifier {
        StateClassifier::new(MonitorConfig::default(), None)
    }

    #[test]
    fn test_no_faces_wins_first() {
        let analysis = rule_only().classify(&[], 0.0);
        assert_eq!(analysis.state, SubjectState::NoFace);
        assert_eq!(analysis.gaze, GazeDirection::Center);
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.label.as_deref(), Some("No Face"));
    }

    #[test]
    fn test_multiple_faces_beats_everything_else() {
        let faces = vec![happy_face(), confused_face()];
        let analysis = rule_only().classify(&faces, 0.0);
        assert_eq!(analysis.state, SubjectState::MultipleFaces);
        assert_eq!(analysis.label.as_deref(), Some("Alert"));
    }

    #[test]
    fn test_neutral_face_is_focused() {
        let analysis = rule_only().classify(&[neutral_face()], 0.0);
        assert_eq!(analysis.state, SubjectState::Focused);
        assert_eq!(analysis.gaze, GazeDirection::Center);
        assert!((analysis.score - 0.2).abs() < 1e-9);
        assert!(analysis.features.is_some());
    }

    #[test]
    fn test_drawn_brows_are_confused_with_brow_score() {
        let analysis = rule_only().classify(&[confused_face()], 0.0);
        assert_eq!(analysis.state, SubjectState::Confused);
        assert!((analysis.score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_wide_mouth_is_happy() {
        let analysis = rule_only().classify(&[happy_face()], 0.0);
        assert_eq!(analysis.state, SubjectState::Happy);
    }

    #[test]
    fn test_model_verdict_precedes_happiness_rule() {
        let mut classifier =
            StateClassifier::new(MonitorConfig::default(), Some(Arc::new(Always(true))));
        let analysis = classifier.classify(&[happy_face()], 0.0);
        assert_eq!(analysis.state, SubjectState::Confused);
    }

    #[test]
    fn test_rule_fallback_fires_when_model_disagrees() {
        let mut classifier =
            StateClassifier::new(MonitorConfig::default(), Some(Arc::new(Always(false))));
        let analysis = classifier.classify(&[confused_face()], 0.0);
        assert_eq!(analysis.state, SubjectState::Confused);
    }

    #[test]
    fn test_smoothing_suppresses_single_spike() {
        let mut classifier = StateClassifier::new(
            MonitorConfig::default(),
            Some(Arc::new(Scripted::new(&[true, false, false]))),
        );
        let face = [neutral_face()];

        // One positive in a length-1 buffer is a majority.
        assert_eq!(
            classifier.classify(&face, 0.0).state,
            SubjectState::Confused
        );
        // The spike is outvoted as the window grows.
        assert_eq!(classifier.classify(&face, 0.1).state, SubjectState::Focused);
        assert_eq!(classifier.classify(&face, 0.2).state, SubjectState::Focused);
    }

    #[test]
    fn test_gaze_shift_does_not_flip_state_before_timeout() {
        let mut classifier = rule_only();
        let face = [gaze_right_face()];

        let analysis = classifier.classify(&face, 0.0);
        assert_eq!(analysis.state, SubjectState::Focused);
        assert_eq!(analysis.gaze, GazeDirection::Right);

        assert_eq!(classifier.classify(&face, 2.0).state, SubjectState::Focused);
        // Exactly at the limit is still within tolerance.
        assert_eq!(classifier.classify(&face, 4.5).state, SubjectState::Focused);
    }

    #[test]
    fn test_sustained_gaze_shift_flags_looking_away() {
        let mut classifier = rule_only();
        let face = [gaze_right_face()];

        classifier.classify(&face, 0.0);
        let analysis = classifier.classify(&face, 4.6);
        assert_eq!(analysis.state, SubjectState::LookingAway);
        assert_eq!(analysis.gaze, GazeDirection::Right);
        assert_eq!(analysis.score, 0.0);
        assert_eq!(analysis.label.as_deref(), Some("Alert"));
    }

    #[test]
    fn test_centered_frame_resets_look_away_timer() {
        let mut classifier = rule_only();
        let away = [gaze_right_face()];

        classifier.classify(&away, 0.0);
        classifier.classify(&[neutral_face()], 1.0);

        // Timer restarts on the next shift.
        classifier.classify(&away, 6.0);
        assert_eq!(classifier.classify(&away, 10.4).state, SubjectState::Focused);
        assert_eq!(
            classifier.classify(&away, 10.6).state,
            SubjectState::LookingAway
        );
    }

    #[test]
    fn test_looking_away_skips_confusion_and_happiness() {
        let mut points = neutral_points();
        points[index::RIGHT_IRIS_CENTER] = Point::new(0.63, 0.45);
        points[index::LEFT_BROW_INNER] = Point::new(0.47, 0.40);
        points[index::RIGHT_BROW_INNER] = Point::new(0.53, 0.40);
        let face = [LandmarkSet::new(points)];

        let mut classifier = rule_only();
        // Confused while the timer runs, looking away once it expires.
        assert_eq!(classifier.classify(&face, 0.0).state, SubjectState::Confused);
        assert_eq!(
            classifier.classify(&face, 5.0).state,
            SubjectState::LookingAway
        );
    }
}
