//! Open Tree web-service checks
//!
//! With no arguments, runs the built-in taxonomy scenario against the
//! configured API host. Exits 0 when every scenario passes, 1 otherwise.

use clap::Parser;
use wscheck::cli;
use wscheck::commands::{Commands, GlobalArgs};
use wscheck::common::logging;

#[derive(Parser)]
#[command(name = "ws-check", about = "End-to-end checks for the Open Tree web services")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version print to stdout and succeed; usage errors fail
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    logging::init_cli(cli.global.verbose);

    match cli::dispatch(cli.command, cli.global).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
