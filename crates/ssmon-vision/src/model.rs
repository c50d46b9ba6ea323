//! Trained confusion model loading.
//!
//! The classifier is a decision tree trained offline on the geometry feature
//! vector and exported as JSON. Loading is best-effort: any failure degrades
//! the pipeline to rule-only confusion detection.

use std::fs;
use std::sync::Arc;

use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::DecisionTreeClassifier;
use tracing::{debug, info, warn};

use crate::classifier::ConfusionModel;
use crate::error::{VisionError, VisionResult};
use crate::features::FeatureVector;

/// Default model location.
const MODEL_PATH: &str = "models/confusion_tree.json";

/// Decision tree over the fixed-order geometry features.
#[derive(Debug)]
pub struct TreeModel {
    tree: DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>,
}

impl TreeModel {
    /// Deserialize a tree exported by the training notebook.
    pub fn from_json(json: &str) -> VisionResult<Self> {
        let tree = serde_json::from_str(json).map_err(|e| VisionError::ModelLoad(e.to_string()))?;
        Ok(Self { tree })
    }
}

impl ConfusionModel for TreeModel {
    fn predict(&self, features: &FeatureVector) -> bool {
        let x = DenseMatrix::from_2d_vec(&vec![features.as_row().to_vec()]);
        match self.tree.predict(&x) {
            Ok(labels) => labels.first() == Some(&1),
            Err(e) => {
                debug!("confusion model prediction failed: {e}");
                false
            }
        }
    }
}

/// Load the confusion model, or degrade to rule-only detection.
pub fn load_default() -> Option<Arc<dyn ConfusionModel>> {
    let path = std::env::var("CONFUSION_MODEL_PATH").unwrap_or_else(|_| MODEL_PATH.to_string());
    match fs::read_to_string(&path) {
        Ok(json) => match TreeModel::from_json(&json) {
            Ok(model) => {
                info!("confusion model loaded from {path}");
                Some(Arc::new(model))
            }
            Err(e) => {
                warn!("{e}; falling back to rule-based confusion detection");
                None
            }
        },
        Err(e) => {
            warn!("confusion model not found at {path} ({e}); falling back to rule-based confusion detection");
            None
        }
    }
}
