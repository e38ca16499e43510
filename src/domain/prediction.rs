use serde::{Deserialize, Serialize};

use super::Target;

/// Revenue, spend and profit estimated for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub revenue: f64,
    pub spend: f64,
    pub profit: f64,
}

/// Daily figures scaled to a work week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPrediction {
    pub revenue: f64,
    pub spend: f64,
    pub profit: f64,
}

macro_rules! impl_figures {
    ($ty:ty) => {
        impl $ty {
            pub fn new(revenue: f64, spend: f64, profit: f64) -> Self {
                Self {
                    revenue,
                    spend,
                    profit,
                }
            }

            pub fn get(&self, target: Target) -> f64 {
                match target {
                    Target::Revenue => self.revenue,
                    Target::Spend => self.spend,
                    Target::Profit => self.profit,
                }
            }

            /// Figures in report order: revenue, spend, profit.
            pub fn figures(&self) -> [(Target, f64); 3] {
                [
                    (Target::Revenue, self.revenue),
                    (Target::Spend, self.spend),
                    (Target::Profit, self.profit),
                ]
            }
        }
    };
}

impl_figures!(DailyPrediction);
impl_figures!(WeeklyPrediction);
