//! Transports that carry a JSON request to the service
//!
//! The runner only sees the [`JsonTransport`] trait. Production code uses
//! [`ReqwestTransport`]; tests substitute a canned responder.

use async_trait::async_trait;

use super::protocol::{JsonRequest, RawResponse};
use crate::common::config::HttpConfig;
use crate::common::{Error, Result};

/// Sends one request and returns the raw status and body
#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn send(&self, request: &JsonRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client from the `[http]` configuration section
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonTransport for ReqwestTransport {
    async fn send(&self, request: &JsonRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header("Accept", "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::http(&request.url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(&request.url, format!("failed to read body: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
