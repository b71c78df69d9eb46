//! E2E Test Runner
//!
//! Reads web-service scenarios (built in or from YAML) and checks the
//! service's JSON responses against structured assertions rather than
//! string matching.

mod assertions;
mod config;
mod runner;

pub use config::*;
pub use runner::{load_scenario, run_scenario, ScenarioContext, TestResult};
