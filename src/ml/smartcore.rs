//! SmartCore ML Model Wrapper
//!
//! Wraps a fitted SmartCore `RandomForestRegressor` so it can be stored as a
//! model artifact and queried through the [`Estimator`] trait.

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::{models::Estimator, FeatureVector, ModelMetadata};
use crate::error::{PredictionError, Result};

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// SmartCore RandomForest Model Wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct SmartcoreRandomForest {
    pub metadata: ModelMetadata,
    model: ForestRegressor,
}

impl SmartcoreRandomForest {
    pub fn new(model: ForestRegressor, metadata: ModelMetadata) -> Self {
        Self { metadata, model }
    }
}

impl Estimator for SmartcoreRandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.is_empty() {
            return Err(PredictionError::invalid("empty feature record"));
        }

        // Convert feature vector to DenseMatrix (1 row, n features)
        let n_features = features.len();
        let x = DenseMatrix::new(1, n_features, features.features.clone(), false);

        let predictions = self
            .model
            .predict(&x)
            .map_err(|e| PredictionError::invalid(format!("random forest prediction failed: {e:?}")))?;

        predictions.first().copied().ok_or_else(|| PredictionError::ModelUnavailable {
            target: None,
            reason: format!("model '{}' returned no prediction", self.metadata.model_id),
        })
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::models::{ArtifactFormat, ModelArtifact};
    use crate::ml::{ModelType, FEATURE_NAME};
    use smartcore::ensemble::random_forest_regressor::RandomForestRegressorParameters;

    fn fitted_forest() -> SmartcoreRandomForest {
        // revenue ~= 100 * calls
        let calls: Vec<f64> = (1..=20).map(f64::from).collect();
        let revenue: Vec<f64> = calls.iter().map(|c| c * 100.0).collect();
        let x = DenseMatrix::new(calls.len(), 1, calls, false);

        let params = RandomForestRegressorParameters {
            max_depth: Some(6),
            min_samples_leaf: 1,
            min_samples_split: 2,
            n_trees: 10,
            m: None,
            keep_samples: false,
            seed: 42,
        };
        let model = RandomForestRegressor::fit(&x, &revenue, params).unwrap();

        SmartcoreRandomForest::new(
            model,
            ModelMetadata::new("rf_model_revenue", ModelType::RandomForest)
                .with_max_training_feature(20.0),
        )
    }

    #[test]
    fn test_predict_within_training_range() {
        let forest = fitted_forest();
        let value = forest
            .predict(&FeatureVector::single(FEATURE_NAME, 10.0))
            .unwrap();
        assert!(value > 500.0 && value < 1500.0, "got {value}");
        assert_eq!(forest.model_type(), ModelType::RandomForest);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let forest = fitted_forest();
        let features = FeatureVector::single(FEATURE_NAME, 7.0);
        let first = forest.predict(&features).unwrap();
        for _ in 0..5 {
            assert_eq!(forest.predict(&features).unwrap(), first);
        }
    }

    #[test]
    fn test_artifact_survives_bincode() {
        let forest = fitted_forest();
        let features = FeatureVector::single(FEATURE_NAME, 12.0);
        let expected = forest.predict(&features).unwrap();

        let bytes = ModelArtifact::RandomForest(forest)
            .encode(ArtifactFormat::Bincode)
            .unwrap();
        let restored = ModelArtifact::decode(&bytes, ArtifactFormat::Bincode)
            .unwrap()
            .into_estimator();

        assert_eq!(restored.predict(&features).unwrap(), expected);
    }

    #[test]
    fn test_empty_features_rejected() {
        let forest = fitted_forest();
        let empty = FeatureVector::new(vec![], vec![]).unwrap();
        assert!(matches!(
            forest.predict(&empty),
            Err(PredictionError::InvalidInput(_))
        ));
    }
}
