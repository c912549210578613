//! Retrieval of the remote boundary payload.

use crate::prelude::{MapConfig, ResolveError, ResolveResult};
use std::future::Future;
use std::time::Duration;

const USER_AGENT: &str = concat!("choroplethcore/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand back the raw bytes of a boundary FeatureCollection.
///
/// The resolver only depends on this trait so tests can substitute canned
/// payloads or forced failures for the network.
pub trait BoundarySource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = ResolveResult<Vec<u8>>> + Send;
}

/// Fetches boundaries with a plain HTTP GET.
#[derive(Clone)]
pub struct HttpBoundarySource {
    client: reqwest::Client,
    url: String,
}

impl HttpBoundarySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ResolveResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ResolveError::Network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &MapConfig) -> ResolveResult<Self> {
        Self::new(
            config.boundary_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl BoundarySource for HttpBoundarySource {
    async fn fetch(&self) -> ResolveResult<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ResolveError::Body(e.to_string()))
    }
}
