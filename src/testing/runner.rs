//! Test runner implementation
//!
//! Executes a scenario: one call through the HTTP-JSON helper, then the
//! scenario's assertions in order, stopping at the first failure.

use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use crate::common::{Error, Result};
use crate::http::{check_json_call, JsonRequest, JsonTransport};

use super::assertions::kind_of;
use super::config::TestScenario;

/// Result of a test run
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub asserts_run: usize,
    pub asserts_total: usize,
    pub error: Option<Error>,
}

/// Everything a scenario needs from its surroundings
pub struct ScenarioContext<'a> {
    /// API host the scenario's path is appended to
    pub base_url: &'a str,
    pub transport: &'a dyn JsonTransport,
    /// Print per-step progress to stdout
    pub verbose: bool,
}

/// Load and parse a YAML scenario file
pub fn load_scenario(path: &Path) -> Result<TestScenario> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse test scenario '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Build the absolute request URL for a scenario
fn request_url(base_url: &str, path: &str) -> Result<String> {
    let url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    reqwest::Url::parse(&url).map_err(|_| Error::InvalidUrl(url.clone()))?;
    Ok(url)
}

/// Run a single scenario
///
/// Check failures come back as a failed [`TestResult`]; `Err` means the
/// scenario could not be run at all.
pub async fn run_scenario(scenario: &TestScenario, ctx: &ScenarioContext<'_>) -> Result<TestResult> {
    let asserts_total = scenario.asserts.len();
    let url = request_url(ctx.base_url, &scenario.request.path)?;

    if ctx.verbose {
        println!(
            "\n{} {}",
            "Running Test:".blue().bold(),
            scenario.name.white().bold()
        );
        if let Some(desc) = &scenario.description {
            println!("  {}", desc.dimmed());
        }
    }

    let mut request = JsonRequest::new(scenario.request.method, url);
    if let Some(body) = &scenario.request.body {
        request = request.with_body(body.clone());
    }

    let failed = |asserts_run: usize, error: Error| {
        tracing::debug!(scenario = %scenario.name, kind = ?error.kind(), error = %error, "scenario failed");
        if ctx.verbose {
            println!("  {} {}", "✗".red(), error);
        }
        TestResult {
            name: scenario.name.clone(),
            passed: false,
            asserts_run,
            asserts_total,
            error: Some(error),
        }
    };

    let body = match check_json_call(ctx.transport, &request, scenario.expect.status).await {
        Ok(body) => body,
        Err(e) => return Ok(failed(0, e)),
    };

    let object = match body {
        Value::Object(map) => map,
        other => {
            return Ok(failed(
                0,
                Error::type_mismatch("response", "object", kind_of(&other)),
            ))
        }
    };

    if ctx.verbose {
        println!(
            "  {} {} {} ({})",
            "✓".green(),
            request.method,
            request.url.dimmed(),
            scenario.expect.status
        );
    }

    for (i, assertion) in scenario.asserts.iter().enumerate() {
        if let Err(e) = assertion.check(&object) {
            return Ok(failed(i + 1, e));
        }
        if ctx.verbose {
            println!(
                "  {} Check {}: {}",
                "✓".green(),
                i + 1,
                assertion.describe().dimmed()
            );
        }
    }

    if ctx.verbose {
        println!("\n{} {}\n", "✓".green().bold(), "Test Passed".green().bold());
    }

    Ok(TestResult {
        name: scenario.name.clone(),
        passed: true,
        asserts_run: asserts_total,
        asserts_total,
        error: None,
    })
}
