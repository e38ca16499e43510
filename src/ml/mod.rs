//! Machine Learning Module
//!
//! Estimators that turn a billable call count into revenue, spend and
//! profit figures:
//! - Estimator trait and linear regression model
//! - SmartCore random forest wrapper (`ml` feature)
//! - Serialized model artifacts
//! - Model store with one-time loading
//! - Artifact acquisition from a remote model host
//!
//! Models are trained offline; this crate only loads and queries them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};

pub mod fetch;
pub mod models;
pub mod store;

#[cfg(feature = "ml")]
pub mod smartcore;

pub use fetch::{ArtifactLocator, ModelFetcher};
pub use models::{Estimator, LinearRegressionModel, ModelArtifact};
pub use store::{ModelHandle, ModelStore};

/// Column name the estimators were fitted with.
pub const FEATURE_NAME: &str = "Converted";

/// ML Model Type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelType {
    LinearRegression,
    RandomForest,
}

/// ML Model Metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    pub model_id: String,
    pub model_type: ModelType,
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    /// Largest feature value seen during training, if recorded.
    #[serde(default)]
    pub max_training_feature: Option<f64>,
}

impl ModelMetadata {
    pub fn new(model_id: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            model_id: model_id.into(),
            model_type,
            version: "1.0.0".to_string(),
            trained_at: Utc::now(),
            feature_names: vec![FEATURE_NAME.to_string()],
            max_training_feature: None,
        }
    }

    pub fn with_max_training_feature(mut self, max: f64) -> Self {
        self.max_training_feature = Some(max);
        self
    }
}

/// One input row: feature values with their column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    pub features: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl FeatureVector {
    pub fn new(features: Vec<f64>, feature_names: Vec<String>) -> Result<Self> {
        if features.len() != feature_names.len() {
            return Err(PredictionError::invalid(format!(
                "Feature count mismatch: {} features, {} names",
                features.len(),
                feature_names.len()
            )));
        }
        Ok(Self {
            features,
            feature_names,
        })
    }

    /// Single-row, single-column record.
    pub fn single(name: impl Into<String>, value: f64) -> Self {
        Self {
            features: vec![value],
            feature_names: vec![name.into()],
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Fails unless the columns match `expected` exactly, in order.
    pub fn ensure_matches(&self, expected: &[String]) -> Result<()> {
        if self.feature_names.len() != expected.len() {
            return Err(PredictionError::invalid(format!(
                "expected {} feature column(s), got {}",
                expected.len(),
                self.feature_names.len()
            )));
        }
        if let Some((got, want)) = self
            .feature_names
            .iter()
            .zip(expected)
            .find(|(got, want)| got != want)
        {
            return Err(PredictionError::invalid(format!(
                "unexpected feature column '{got}', expected '{want}'"
            )));
        }
        Ok(())
    }
}
