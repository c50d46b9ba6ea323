//! Facial landmark detector boundary.
//!
//! The detector is an external collaborator. This module provides the trait
//! the pipeline consumes plus a placeholder used when no inference backend is
//! compiled in - the pipeline then reports every frame as face-free.

use std::path::Path;
use std::sync::{Arc, Once};

use image::DynamicImage;
use tracing::warn;

use crate::error::VisionResult;
use crate::landmarks::LandmarkSet;

/// Default landmarker asset location.
const LANDMARKER_ASSET: &str = "models/face_landmarker.task";

/// Facial landmark detection boundary.
pub trait LandmarkDetector: Send + Sync {
    /// Detect faces in a decoded frame.
    ///
    /// `timestamp_ms` must be strictly increasing across calls within one
    /// stream; [`crate::SubjectSession`] guarantees this for its detector.
    /// Returns zero, one, or multiple landmark sets.
    fn detect(&self, frame: &DynamicImage, timestamp_ms: i64) -> VisionResult<Vec<LandmarkSet>>;
}

/// Placeholder detector for builds without a landmarker backend.
pub struct DisabledLandmarker;

impl LandmarkDetector for DisabledLandmarker {
    fn detect(&self, _frame: &DynamicImage, _timestamp_ms: i64) -> VisionResult<Vec<LandmarkSet>> {
        static WARNED: Once = Once::new();
        WARNED.call_once(|| {
            warn!("landmark detection disabled: no landmarker backend in this build");
        });
        Ok(Vec::new())
    }
}

/// Resolve the detector for this process.
///
/// Currently always the placeholder; logs whether the landmarker asset was
/// found so a missing asset can be told apart from a disabled backend.
pub fn load_default() -> Arc<dyn LandmarkDetector> {
    let path =
        std::env::var("FACE_LANDMARKER_PATH").unwrap_or_else(|_| LANDMARKER_ASSET.to_string());
    if Path::new(&path).exists() {
        warn!("landmarker asset found at {path} but no inference backend is enabled in this build");
    } else {
        warn!("landmarker asset not found at {path}; landmark detection disabled");
    }
    Arc::new(DisabledLandmarker)
}
