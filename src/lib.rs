//! Open Tree web-service checks
//!
//! Sends requests to the Open Tree of Life APIs and validates the JSON
//! responses against fixed expectations.

pub mod cli;
pub mod commands;
pub mod common;
pub mod http;
pub mod taxonomy;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{run_scenario, ScenarioContext, TestResult, TestScenario};
