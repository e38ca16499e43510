use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{BillableCallCount, DailyPrediction, Target};
use crate::error::Result;
use crate::ml::{FeatureVector, ModelStore, FEATURE_NAME};

/// Turns a billable call count into daily revenue, spend and profit.
#[derive(Clone)]
pub struct PredictionEngine {
    store: Arc<ModelStore>,
}

impl PredictionEngine {
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// Input below one is rejected before any estimator runs. If any of the
    /// three estimators fails the whole prediction fails.
    pub fn predict(&self, calls: i64) -> Result<DailyPrediction> {
        let calls = BillableCallCount::new(calls)?;
        let features = FeatureVector::single(FEATURE_NAME, calls.as_feature());

        self.warn_if_extrapolating(calls);

        let daily = DailyPrediction {
            revenue: self.store.predict(Target::Revenue, &features)?,
            spend: self.store.predict(Target::Spend, &features)?,
            profit: self.store.predict(Target::Profit, &features)?,
        };

        debug!(
            %calls,
            revenue = daily.revenue,
            spend = daily.spend,
            profit = daily.profit,
            "daily prediction"
        );
        Ok(daily)
    }

    fn warn_if_extrapolating(&self, calls: BillableCallCount) {
        for target in self.store.targets() {
            let max = self
                .store
                .estimator(target)
                .and_then(|e| e.metadata().max_training_feature);
            if let Some(max) = max {
                if calls.as_feature() > max {
                    warn!(%target, %calls, max_training_feature = max, "input beyond training range");
                }
            }
        }
    }
}
