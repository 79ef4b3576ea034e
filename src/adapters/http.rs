use crate::core::Storage;
use crate::utils::error::{DashboardError, Result};
use reqwest::Client;
use url::Url;

/// Read-only storage that fetches files over HTTP(S).
///
/// Paths are resolved against `base_url` when one is set, otherwise they must
/// be absolute URLs.
#[derive(Debug, Clone)]
pub struct HttpStorage {
    client: Client,
    base_url: Option<Url>,
}

impl HttpStorage {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| DashboardError::InvalidConfigValueError {
            field: "source.location".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url: Some(base),
        })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        let resolved = match &self.base_url {
            Some(base) if path.is_empty() => Ok(base.clone()),
            Some(base) => base.join(path),
            None => Url::parse(path),
        };
        resolved.map_err(|e| DashboardError::InvalidConfigValueError {
            field: "source.location".to_string(),
            value: path.to_string(),
            reason: format!("Cannot resolve URL: {}", e),
        })
    }
}

impl Default for HttpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for HttpStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.resolve(path)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        tracing::debug!("HTTP response status: {}", response.status());

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    async fn write_file(&self, path: &str, _data: &[u8]) -> Result<()> {
        Err(DashboardError::Unsupported {
            message: format!("cannot write '{}' to an HTTP source", path),
        })
    }
}
