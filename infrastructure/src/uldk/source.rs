//! HTTP adapter for the ULDK parcel service

use super::response::parse_uldk_response;
use crate::config::FileServiceConfig;
use async_trait::async_trait;
use parcel_application::{FetchError, GeometrySource};
use parcel_domain::{ParcelId, Polygon};
use std::time::Duration;
use tracing::debug;

/// [`GeometrySource`] backed by `GET {base_url}?request=GetParcelById&id=...`
///
/// Cloning is cheap; the inner `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct UldkGeometrySource {
    client: reqwest::Client,
    base_url: String,
}

impl UldkGeometrySource {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &FileServiceConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.base_url.trim(), config.timeout(), &config.user_agent)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GeometrySource for UldkGeometrySource {
    async fn fetch(&self, id: &ParcelId) -> Result<Polygon, FetchError> {
        debug!("GetParcelById {}", id);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("request", "GetParcelById"), ("id", id.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Connection(format!("{}: {}", self.base_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::server_response(
                id,
                format!(
                    "HTTP error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let body = response.text().await.map_err(|e| {
            FetchError::server_response(id, format!("Failed to read response body: {e}"))
        })?;

        parse_uldk_response(id, &body)
    }
}
