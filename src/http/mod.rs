//! HTTP-JSON helper
//!
//! [`check_json_call`] performs one call, compares the status code, and
//! decodes the body. A passing call yields the decoded JSON; every way of
//! failing (transport error, wrong status, undecodable body) is an `Err`.

pub mod protocol;
pub mod transport;

pub use protocol::{JsonRequest, Method, RawResponse};
pub use transport::{JsonTransport, ReqwestTransport};

use serde_json::Value;

use crate::common::{Error, Result};

/// Longest body excerpt carried in a status error
const BODY_EXCERPT_CHARS: usize = 200;

/// Send `request` and require `expected_status` plus a JSON body
pub async fn check_json_call(
    transport: &dyn JsonTransport,
    request: &JsonRequest,
    expected_status: u16,
) -> Result<Value> {
    tracing::debug!(method = %request.method, url = %request.url, "sending request");

    let response = transport.send(request).await?;

    tracing::debug!(status = response.status, bytes = response.body.len(), "response received");

    if response.status != expected_status {
        return Err(Error::UnexpectedStatus {
            url: request.url.clone(),
            expected: expected_status,
            actual: response.status,
            body: excerpt(&response.body),
        });
    }

    serde_json::from_str(&response.body).map_err(|e| Error::InvalidJson {
        url: request.url.clone(),
        message: e.to_string(),
    })
}

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
