use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ModelsConfig;
use crate::domain::Target;
use crate::error::{PredictionError, Result};

/// Maps a target to its artifact file name, local path and remote URL.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    dir: PathBuf,
    base_url: Option<String>,
    file_prefix: String,
    extension: String,
}

impl ArtifactLocator {
    pub fn from_config(cfg: &ModelsConfig) -> Self {
        Self {
            dir: cfg.dir.clone(),
            base_url: cfg.base_url.clone(),
            file_prefix: cfg.file_prefix.clone(),
            extension: cfg.extension.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// e.g. `rf_model_revenue.bin`
    pub fn file_name(&self, target: Target) -> String {
        format!("{}{}.{}", self.file_prefix, target, self.extension)
    }

    pub fn local_path(&self, target: Target) -> PathBuf {
        self.dir.join(self.file_name(target))
    }

    pub fn remote_url(&self, target: Target) -> Option<String> {
        self.base_url.as_ref().map(|base| {
            format!("{}/{}", base.trim_end_matches('/'), self.file_name(target))
        })
    }
}

/// Ensures artifacts are present in the local model directory.
///
/// An artifact already on disk is never re-downloaded.
pub struct ModelFetcher {
    locator: ArtifactLocator,
    client: Option<ClientWithMiddleware>,
}

impl ModelFetcher {
    pub fn new(cfg: &ModelsConfig) -> Result<Self> {
        let locator = ArtifactLocator::from_config(cfg);
        let client = match &cfg.base_url {
            Some(_) => Some(build_client(cfg)?),
            None => None,
        };
        Ok(Self { locator, client })
    }

    pub async fn ensure_local(&self, target: Target) -> Result<PathBuf> {
        let path = self.locator.local_path(target);
        if is_file(&path).await {
            debug!(%target, path = %path.display(), "model artifact cached locally");
            return Ok(path);
        }

        let (Some(client), Some(url)) = (&self.client, self.locator.remote_url(target)) else {
            return Err(PredictionError::unavailable(
                target,
                format!(
                    "artifact {} not found and no remote model host configured",
                    path.display()
                ),
            ));
        };

        self.download(client, target, &url, &path).await?;
        Ok(path)
    }

    async fn download(
        &self,
        client: &ClientWithMiddleware,
        target: Target,
        url: &str,
        path: &Path,
    ) -> Result<()> {
        info!(%target, %url, "fetching model artifact");

        let resp = client.get(url).send().await.map_err(|e| {
            warn!(%target, %url, error = %e, "model fetch failed");
            PredictionError::unavailable(target, format!("GET {url} failed: {e}"))
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%target, %url, %status, "model host returned an error");
            return Err(PredictionError::unavailable(
                target,
                format!("GET {url} returned HTTP {status}"),
            ));
        }
        let bytes = resp.bytes().await.map_err(|e| {
            PredictionError::unavailable(target, format!("reading {url} failed: {e}"))
        })?;

        let io_err = |e: std::io::Error| {
            PredictionError::unavailable(target, format!("writing {} failed: {e}", path.display()))
        };
        tokio::fs::create_dir_all(self.locator.dir()).await.map_err(io_err)?;

        // Write then rename so a partial download never looks like a cached model.
        let partial = path.with_extension(format!("{}.part", self.locator.extension));
        let written = match tokio::fs::write(&partial, &bytes).await {
            Ok(()) => tokio::fs::rename(&partial, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                debug!(path = %partial.display(), error = %cleanup, "partial artifact not removed");
            }
            return Err(io_err(e));
        }

        info!(%target, path = %path.display(), bytes = bytes.len(), "model artifact cached");
        Ok(())
    }
}

fn build_client(cfg: &ModelsConfig) -> Result<ClientWithMiddleware> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("revenue-predictor/0.2"));
    let inner = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.fetch_timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| PredictionError::ModelUnavailable {
            target: None,
            reason: format!("HTTP client setup failed: {e}"),
        })?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(cfg.fetch_max_retries);
    Ok(ClientBuilder::new(inner)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
