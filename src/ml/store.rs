//! Model Store
//!
//! Holds one fitted estimator per [`Target`]. The store is built once and is
//! read-only afterwards, so it can be shared across requests behind an `Arc`
//! without locking.

use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::models::{ArtifactFormat, Estimator, ModelArtifact};
use super::{FeatureVector, ModelFetcher, FEATURE_NAME};
use crate::config::ModelsConfig;
use crate::domain::Target;
use crate::error::{PredictionError, Result};

pub struct ModelStore {
    estimators: HashMap<Target, Arc<dyn Estimator>>,
}

impl ModelStore {
    /// Fetch (if needed), read and decode the artifact of every target.
    ///
    /// Fails as a whole if any target cannot be loaded.
    pub async fn load(cfg: &ModelsConfig) -> Result<Self> {
        let fetcher = ModelFetcher::new(cfg)?;
        let mut estimators: HashMap<Target, Arc<dyn Estimator>> = HashMap::new();

        for target in Target::iter() {
            let path = fetcher.ensure_local(target).await?;
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                PredictionError::unavailable(target, format!("reading {} failed: {e}", path.display()))
            })?;

            let artifact = ModelArtifact::decode(&bytes, ArtifactFormat::from_path(&path))
                .map_err(|e| {
                    warn!(%target, path = %path.display(), error = %e, "model artifact rejected");
                    PredictionError::unavailable(target, format!("{e:#}"))
                })?;

            let feature_names = &artifact.metadata().feature_names;
            if feature_names.len() != 1 || feature_names[0] != FEATURE_NAME {
                warn!(%target, ?feature_names, "model artifact has wrong input columns");
                return Err(PredictionError::unavailable(
                    target,
                    format!("estimator expects columns {feature_names:?}, not [\"{FEATURE_NAME}\"]"),
                ));
            }

            info!(
                %target,
                path = %path.display(),
                model_id = %artifact.metadata().model_id,
                model_type = ?artifact.metadata().model_type,
                "model loaded"
            );
            estimators.insert(target, artifact.into_estimator());
        }

        Ok(Self { estimators })
    }

    pub fn from_estimators<I>(estimators: I) -> Self
    where
        I: IntoIterator<Item = (Target, Arc<dyn Estimator>)>,
    {
        Self {
            estimators: estimators.into_iter().collect(),
        }
    }

    pub fn estimator(&self, target: Target) -> Option<&Arc<dyn Estimator>> {
        self.estimators.get(&target)
    }

    /// Targets with a registered estimator, in report order.
    pub fn targets(&self) -> Vec<Target> {
        Target::iter()
            .filter(|t| self.estimators.contains_key(t))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        Target::iter().all(|t| self.estimators.contains_key(&t))
    }

    /// Apply the estimator for `target` to one feature record.
    pub fn predict(&self, target: Target, features: &FeatureVector) -> Result<f64> {
        let estimator = self
            .estimators
            .get(&target)
            .ok_or_else(|| PredictionError::unavailable(target, "no estimator loaded"))?;

        features.ensure_matches(&estimator.metadata().feature_names)?;
        let value = estimator.predict(features)?;
        if !value.is_finite() {
            warn!(%target, value, "estimator produced a non-finite value");
            return Err(PredictionError::unavailable(
                target,
                format!("estimator produced {value}"),
            ));
        }
        Ok(value)
    }
}

impl std::fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelStore")
            .field("targets", &self.targets())
            .finish()
    }
}

/// Loads the [`ModelStore`] at most once and shares it afterwards.
///
/// Concurrent callers of [`ModelHandle::get`] wait on the same load. A failed
/// load leaves the handle empty so a later call can try again.
#[derive(Clone)]
pub struct ModelHandle {
    cell: Arc<OnceCell<Arc<ModelStore>>>,
    cfg: ModelsConfig,
}

impl ModelHandle {
    pub fn new(cfg: ModelsConfig) -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            cfg,
        }
    }

    pub fn preloaded(store: ModelStore) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(Arc::new(store)))),
            cfg: ModelsConfig::default(),
        }
    }

    pub async fn get(&self) -> Result<Arc<ModelStore>> {
        self.cell
            .get_or_try_init(|| async { ModelStore::load(&self.cfg).await.map(Arc::new) })
            .await
            .cloned()
    }

    /// The store, if it has been loaded already.
    pub fn loaded(&self) -> Option<Arc<ModelStore>> {
        self.cell.get().cloned()
    }
}
