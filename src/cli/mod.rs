//! Command dispatch
//!
//! Resolves configuration once, builds the transport, and runs the
//! selected scenarios one after another.

use colored::Colorize;
use std::path::PathBuf;

use crate::commands::{Commands, GlobalArgs};
use crate::common::{Config, Result};
use crate::http::ReqwestTransport;
use crate::taxonomy;
use crate::testing::{load_scenario, run_scenario, ScenarioContext, TestScenario};

/// Dispatch a command; returns whether every scenario passed
pub async fn dispatch(command: Option<Commands>, args: GlobalArgs) -> Result<bool> {
    match command {
        Some(Commands::List) => {
            for scenario in taxonomy::builtin_scenarios() {
                println!("{}", scenario.name.bold());
                if let Some(desc) = &scenario.description {
                    println!("  {}", desc.dimmed());
                }
            }
            Ok(true)
        }

        Some(Commands::Run { paths }) => {
            let scenarios = paths
                .iter()
                .map(PathBuf::as_path)
                .map(load_scenario)
                .collect::<Result<Vec<_>>>()?;
            run_all(&scenarios, args).await
        }

        None => run_all(&taxonomy::builtin_scenarios(), args).await,
    }
}

/// Run scenarios in order and report each failure on stderr
async fn run_all(scenarios: &[TestScenario], args: GlobalArgs) -> Result<bool> {
    let config = Config::load(args.config.as_deref())?.with_apihost(args.host);
    let base_url = config.lookup("host", "apihost")?;
    let transport = ReqwestTransport::new(&config.http)?;

    tracing::info!(host = %base_url, count = scenarios.len(), "running scenarios");

    let ctx = ScenarioContext {
        base_url: &base_url,
        transport: &transport,
        verbose: args.verbose,
    };

    let mut all_passed = true;
    for scenario in scenarios {
        let result = run_scenario(scenario, &ctx).await?;
        if let Some(error) = &result.error {
            all_passed = false;
            eprintln!("{}: {}", result.name, error);
        }
    }

    Ok(all_passed)
}
