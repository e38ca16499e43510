use crate::domain::{DailyPrediction, WeeklyPrediction};

/// Workdays in a week used when no other value is configured.
pub const DEFAULT_WORKDAYS_PER_WEEK: f64 = 5.0;

/// Scales daily figures to a work week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyProjector {
    workdays_per_week: f64,
}

impl WeeklyProjector {
    pub fn new(workdays_per_week: f64) -> Self {
        Self { workdays_per_week }
    }

    pub fn workdays_per_week(&self) -> f64 {
        self.workdays_per_week
    }

    pub fn project(&self, daily: &DailyPrediction) -> WeeklyPrediction {
        WeeklyPrediction {
            revenue: daily.revenue * self.workdays_per_week,
            spend: daily.spend * self.workdays_per_week,
            profit: daily.profit * self.workdays_per_week,
        }
    }
}

impl Default for WeeklyProjector {
    fn default() -> Self {
        Self::new(DEFAULT_WORKDAYS_PER_WEEK)
    }
}
