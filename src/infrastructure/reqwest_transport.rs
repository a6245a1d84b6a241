// Reqwest implementation of the transport boundary
use crate::application::transport::{Transport, TransportResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// HTTPS transport backed by a shared `reqwest::Client`, so repeated
/// sends reuse connections.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse> {
        // .json() sets the Content-Type: application/json header
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request to datadog")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read datadog response body")?;

        Ok(TransportResponse { status, body })
    }
}
