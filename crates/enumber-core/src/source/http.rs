use crate::error::EnumberError;
use crate::source::{parse_taxonomy, RawTaxonomy, TaxonomySource, DEFAULT_SOURCE_URL};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Taxonomy backend that downloads the payload over HTTP.
///
/// The request is bounded by `timeout`; this is the only step of a run that
/// waits on anything external.
pub struct HttpTaxonomySource {
    url: String,
    timeout: Duration,
    snapshot_dir: Option<PathBuf>,
}

impl HttpTaxonomySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        HttpTaxonomySource {
            url: url.into(),
            timeout,
            snapshot_dir: None,
        }
    }

    /// Keep a dated copy of every downloaded payload in `dir`.
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_error(&self, err: reqwest::Error) -> EnumberError {
        let reason = if err.is_timeout() {
            format!("timed out after {}s", self.timeout.as_secs())
        } else if let Some(status) = err.status() {
            format!("HTTP status {status}")
        } else {
            err.to_string()
        };
        EnumberError::Fetch {
            url: self.url.clone(),
            reason,
        }
    }
}

impl Default for HttpTaxonomySource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL, Duration::from_secs(30))
    }
}

impl TaxonomySource for HttpTaxonomySource {
    fn fetch(&self) -> Result<RawTaxonomy, EnumberError> {
        info!(url = %self.url, timeout_secs = self.timeout.as_secs(), "downloading taxonomy");

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.fetch_error(e))?;

        let body = client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| self.fetch_error(e))?;

        if let Some(dir) = &self.snapshot_dir {
            match write_snapshot(dir, &body, Utc::now()) {
                Ok(path) => info!(path = %path.display(), "saved raw taxonomy snapshot"),
                Err(e) => warn!(dir = %dir.display(), error = %e, "could not save raw snapshot"),
            }
        }

        let taxonomy = parse_taxonomy(&body)?;
        info!(entries = taxonomy.len(), "downloaded taxonomy");
        Ok(taxonomy)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}

/// Write the raw payload to `<dir>/openfoodfacts_raw_YYYYMMDD.json`.
pub fn write_snapshot(
    dir: &Path,
    body: &str,
    taken_at: DateTime<Utc>,
) -> Result<PathBuf, EnumberError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "openfoodfacts_raw_{}.json",
        taken_at.format("%Y%m%d")
    ));
    std::fs::write(&path, body)?;
    Ok(path)
}
