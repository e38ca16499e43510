//! ML Model Definitions
//!
//! The estimator trait, the linear regression model and the on-disk artifact
//! envelope that wraps every estimator kind.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::{FeatureVector, ModelMetadata, ModelType};
use crate::error::{PredictionError, Result};

/// Trait for fitted estimators
#[cfg_attr(test, mockall::automock)]
pub trait Estimator: Send + Sync {
    /// Predict a scalar from a one-row feature record
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Get model metadata
    fn metadata(&self) -> &ModelMetadata;

    /// Get model type
    fn model_type(&self) -> ModelType {
        self.metadata().model_type
    }
}

/// Simple Linear Regression Model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRegressionModel {
    pub metadata: ModelMetadata,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressionModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64, metadata: ModelMetadata) -> Self {
        Self {
            metadata,
            coefficients,
            intercept,
        }
    }

    /// `y = slope * x` over the single call-count feature.
    pub fn proportional(model_id: impl Into<String>, slope: f64) -> Self {
        Self::new(
            vec![slope],
            0.0,
            ModelMetadata::new(model_id, ModelType::LinearRegression),
        )
    }
}

impl Estimator for LinearRegressionModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::invalid(format!(
                "Feature count mismatch: expected {}, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let prediction: f64 = features
            .features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, c)| f * c)
            .sum::<f64>()
            + self.intercept;

        Ok(prediction)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Encoding of an artifact file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Bincode
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Bincode)
    }
}

/// Serialized estimator as stored in the model directory.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearRegressionModel),
    #[cfg(feature = "ml")]
    RandomForest(super::smartcore::SmartcoreRandomForest),
}

impl ModelArtifact {
    pub fn decode(bytes: &[u8], format: ArtifactFormat) -> anyhow::Result<Self> {
        match format {
            ArtifactFormat::Json => {
                serde_json::from_slice(bytes).context("JSON model artifact decode failed")
            }
            ArtifactFormat::Bincode => {
                bincode::deserialize(bytes).context("bincode model artifact decode failed")
            }
        }
    }

    pub fn encode(&self, format: ArtifactFormat) -> anyhow::Result<Vec<u8>> {
        match format {
            ArtifactFormat::Json => {
                serde_json::to_vec_pretty(self).context("JSON model artifact encode failed")
            }
            ArtifactFormat::Bincode => {
                bincode::serialize(self).context("bincode model artifact encode failed")
            }
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        match self {
            Self::Linear(m) => &m.metadata,
            #[cfg(feature = "ml")]
            Self::RandomForest(m) => &m.metadata,
        }
    }

    pub fn into_estimator(self) -> Arc<dyn Estimator> {
        match self {
            Self::Linear(m) => Arc::new(m),
            #[cfg(feature = "ml")]
            Self::RandomForest(m) => Arc::new(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::FEATURE_NAME;

    #[test]
    fn test_linear_regression_predict() {
        let model = LinearRegressionModel::new(
            vec![100.0],
            5.0,
            ModelMetadata::new("test", ModelType::LinearRegression),
        );

        let prediction = model
            .predict(&FeatureVector::single(FEATURE_NAME, 10.0))
            .unwrap();
        // 100*10 + 5
        assert_eq!(prediction, 1005.0);
        assert_eq!(model.model_type(), ModelType::LinearRegression);
    }

    #[test]
    fn test_linear_regression_rejects_wrong_width() {
        let model = LinearRegressionModel::proportional("test", 40.0);
        let features = FeatureVector::new(
            vec![1.0, 2.0],
            vec![FEATURE_NAME.to_string(), "Other".to_string()],
        )
        .unwrap();
        assert!(matches!(
            model.predict(&features),
            Err(PredictionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ArtifactFormat::from_path(Path::new("models/rf_model_revenue.json")),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("models/rf_model_revenue.bin")),
            ArtifactFormat::Bincode
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("models/rf_model_revenue")),
            ArtifactFormat::Bincode
        );
    }

    #[test]
    fn test_json_artifact_decodes_to_estimator() {
        let json = serde_json::json!({
            "linear": {
                "metadata": {
                    "model_id": "rf_model_spend",
                    "model_type": "LinearRegression",
                    "version": "1.0.0",
                    "trained_at": "2025-01-01T00:00:00Z",
                    "feature_names": ["Converted"]
                },
                "coefficients": [40.0],
                "intercept": 0.0
            }
        });
        let bytes = serde_json::to_vec(&json).unwrap();

        let artifact = ModelArtifact::decode(&bytes, ArtifactFormat::Json).unwrap();
        assert_eq!(artifact.metadata().model_id, "rf_model_spend");

        let estimator = artifact.into_estimator();
        let value = estimator
            .predict(&FeatureVector::single(FEATURE_NAME, 10.0))
            .unwrap();
        assert_eq!(value, 400.0);
    }

    #[test]
    fn test_bincode_artifact_preserves_parameters() {
        let model = LinearRegressionModel::new(
            vec![60.0],
            -2.5,
            ModelMetadata::new("rf_model_profit", ModelType::LinearRegression)
                .with_max_training_feature(500.0),
        );
        let bytes = ModelArtifact::Linear(model.clone())
            .encode(ArtifactFormat::Bincode)
            .unwrap();

        match ModelArtifact::decode(&bytes, ArtifactFormat::Bincode).unwrap() {
            ModelArtifact::Linear(decoded) => assert_eq!(decoded, model),
            #[cfg(feature = "ml")]
            other => panic!("unexpected artifact kind: {:?}", other.metadata().model_type),
        }
    }

    #[test]
    fn test_garbage_artifact_fails_to_decode() {
        assert!(ModelArtifact::decode(b"not a model", ArtifactFormat::Json).is_err());
        assert!(ModelArtifact::decode(&[0xff, 0xff, 0xff], ArtifactFormat::Bincode).is_err());
    }
}
