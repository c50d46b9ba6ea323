//! Per-subject analysis session.

use std::sync::Arc;

use ssmon_models::FrameAnalysis;
use tracing::debug;

use crate::classifier::{ConfusionModel, StateClassifier};
use crate::config::MonitorConfig;
use crate::detector::LandmarkDetector;

/// Strictly increasing timestamp generator.
///
/// The landmark detector requires non-decreasing timestamps per stream. When
/// the wall clock stalls or steps backwards under frame bursts, the last
/// value is bumped by one millisecond instead.
#[derive(Debug, Default)]
struct MonotonicTimestamps {
    last_ms: i64,
}

impl MonotonicTimestamps {
    fn next(&mut self, now_ms: i64) -> i64 {
        let ts = if now_ms <= self.last_ms {
            self.last_ms + 1
        } else {
            now_ms
        };
        self.last_ms = ts;
        ts
    }
}

/// One connected student's analysis pipeline.
///
/// Created with the connection and dropped on disconnect; no state survives
/// a reconnect.
pub struct SubjectSession {
    detector: Arc<dyn LandmarkDetector>,
    classifier: StateClassifier,
    timestamps: MonotonicTimestamps,
    frame_count: u64,
}

impl SubjectSession {
    pub fn new(
        detector: Arc<dyn LandmarkDetector>,
        model: Option<Arc<dyn ConfusionModel>>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            detector,
            classifier: StateClassifier::new(config, model),
            timestamps: MonotonicTimestamps::default(),
            frame_count: 0,
        }
    }

    /// Frames successfully decoded so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Analyze one frame's bytes arriving at `now_ms` (Unix milliseconds).
    ///
    /// Undecodable bytes yield the degenerate no-frame result without
    /// touching the detector; a detector failure reads as no face found.
    pub fn analyze_frame(&mut self, image: &[u8], now_ms: i64) -> FrameAnalysis {
        let frame = match image::load_from_memory(image) {
            Ok(frame) => frame,
            Err(e) => {
                debug!("frame decode failed: {e}");
                return FrameAnalysis::no_frame();
            }
        };
        self.frame_count += 1;

        let timestamp_ms = self.timestamps.next(now_ms);
        let faces = match self.detector.detect(&frame, timestamp_ms) {
            Ok(faces) => faces,
            Err(e) => {
                debug!("landmark detection failed: {e}");
                Vec::new()
            }
        };

        self.classifier.classify(&faces, now_ms as f64 / 1000.0)
    }
}
