#![allow(dead_code)]
//! Shared fixtures: model directories populated with linear artifacts.

use revenue_predictor::config::ModelsConfig;
use revenue_predictor::domain::Target;
use revenue_predictor::ml::models::ArtifactFormat;
use revenue_predictor::ml::{LinearRegressionModel, ModelArtifact};
use std::path::Path;

/// Slopes of the reference scenario: revenue 100x, spend 40x, profit 60x.
pub const SCENARIO: [(Target, f64); 3] = [
    (Target::Revenue, 100.0),
    (Target::Spend, 40.0),
    (Target::Profit, 60.0),
];

pub fn models_config(dir: &Path, extension: &str) -> ModelsConfig {
    ModelsConfig {
        dir: dir.to_path_buf(),
        extension: extension.to_string(),
        fetch_max_retries: 0,
        fetch_timeout_seconds: 5,
        ..ModelsConfig::default()
    }
}

pub fn artifact_bytes(target: Target, slope: f64, format: ArtifactFormat) -> Vec<u8> {
    ModelArtifact::Linear(LinearRegressionModel::proportional(
        format!("rf_model_{target}"),
        slope,
    ))
    .encode(format)
    .expect("encode artifact")
}

pub fn write_artifact(dir: &Path, extension: &str, target: Target, slope: f64) {
    let format = ArtifactFormat::from_extension(extension);
    let path = dir.join(format!("rf_model_{target}.{extension}"));
    std::fs::write(path, artifact_bytes(target, slope, format)).expect("write artifact");
}

pub fn write_scenario(dir: &Path, extension: &str) {
    for (target, slope) in SCENARIO {
        write_artifact(dir, extension, target, slope);
    }
}
