pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod ml;
pub mod report;
pub mod telemetry;

pub use error::{PredictionError, Result};
