use tracing::info;

use super::{PredictionEngine, WeeklyProjector};
use crate::domain::{DailyPrediction, WeeklyPrediction};
use crate::error::Result;

/// Entry point the presentation layer calls for one prediction cycle.
#[derive(Clone)]
pub struct PredictionService {
    engine: PredictionEngine,
    projector: WeeklyProjector,
}

impl PredictionService {
    pub fn new(engine: PredictionEngine, projector: WeeklyProjector) -> Self {
        Self { engine, projector }
    }

    pub fn projector(&self) -> &WeeklyProjector {
        &self.projector
    }

    pub fn handle_predict(&self, calls: i64) -> Result<(DailyPrediction, WeeklyPrediction)> {
        let daily = self.engine.predict(calls)?;
        let weekly = self.projector.project(&daily);
        info!(
            calls,
            daily_revenue = daily.revenue,
            weekly_revenue = weekly.revenue,
            "prediction served"
        );
        Ok((daily, weekly))
    }
}
