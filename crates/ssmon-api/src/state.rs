//! Application state.

use std::sync::Arc;

use ssmon_vision::{detector, model, ConfusionModel, LandmarkDetector};

use crate::config::ApiConfig;
use crate::registry::Registry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub registry: Arc<Registry>,
    pub detector: Arc<dyn LandmarkDetector>,
    pub model: Option<Arc<dyn ConfusionModel>>,
}

impl AppState {
    /// Create state with explicit collaborators.
    pub fn new(
        config: ApiConfig,
        detector: Arc<dyn LandmarkDetector>,
        model: Option<Arc<dyn ConfusionModel>>,
    ) -> Self {
        Self {
            config,
            registry: Arc::new(Registry::new()),
            detector,
            model,
        }
    }

    /// Create state with the collaborators resolved from the environment.
    /// A missing confusion model degrades to rule-only classification.
    pub fn from_env(config: ApiConfig) -> Self {
        Self::new(config, detector::load_default(), model::load_default())
    }
}
