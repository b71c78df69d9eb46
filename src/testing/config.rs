//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::Deserialize;
use serde_json::Value;

use crate::http::Method;

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug, Clone)]
pub struct TestScenario {
    /// Name of the test scenario
    pub name: String,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// The call to make
    pub request: RequestConfig,
    /// Expectations on the raw response
    #[serde(default)]
    pub expect: ResponseExpectation,
    /// Assertions on the decoded body, checked in order
    #[serde(default)]
    pub asserts: Vec<Assertion>,
}

/// The request a scenario sends
#[derive(Deserialize, Debug, Clone)]
pub struct RequestConfig {
    /// HTTP method (default: POST)
    #[serde(default)]
    pub method: Method,
    /// Path appended to the configured API host, e.g. "/v2/taxonomy/taxon"
    pub path: String,
    /// JSON payload
    pub body: Option<Value>,
}

/// Expectations on the response before the body is inspected
#[derive(Deserialize, Debug, Clone)]
pub struct ResponseExpectation {
    /// Required status code (default: 200)
    #[serde(default = "default_status")]
    pub status: u16,
}

impl Default for ResponseExpectation {
    fn default() -> Self {
        Self {
            status: default_status(),
        }
    }
}

fn default_status() -> u16 {
    200
}

/// A single check against the decoded response object
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Assertion {
    /// The field must exist
    FieldPresent { field: String },
    /// The field must exist and equal `value`
    FieldEquals { field: String, value: Value },
    /// The field must be a non-empty array
    NonEmpty { field: String },
    /// The field must be an array holding an object whose `key` equals `value`
    ContainsEntry {
        field: String,
        key: String,
        value: Value,
    },
}
