use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::PredictionError;
use crate::forecast::{PredictionEngine, PredictionService, WeeklyProjector};
use crate::ml::{ModelHandle, ModelStore};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub models: ModelHandle,
    pub projector: WeeklyProjector,
}

impl AppState {
    /// Build the state; with `models.preload` the store is loaded here and
    /// startup fails if any estimator is unavailable.
    pub async fn new(cfg: Config) -> Result<Self> {
        let models = ModelHandle::new(cfg.models.clone());
        if cfg.models.preload {
            let store = models.get().await?;
            info!(targets = ?store.targets(), "models preloaded");
        } else {
            warn!("model preload disabled; models load on first prediction");
        }
        Ok(Self::with_models(cfg, models))
    }

    pub fn with_models(cfg: Config, models: ModelHandle) -> Self {
        let projector = WeeklyProjector::new(cfg.projection.workdays_per_week);
        Self {
            cfg: Arc::new(cfg),
            models,
            projector,
        }
    }

    /// Test and embedding helper: state around an already built store.
    pub fn from_store(cfg: Config, store: ModelStore) -> Self {
        Self::with_models(cfg, ModelHandle::preloaded(store))
    }

    pub async fn prediction_service(&self) -> Result<PredictionService, PredictionError> {
        let store = self.models.get().await?;
        Ok(PredictionService::new(
            PredictionEngine::new(store),
            self.projector,
        ))
    }
}
