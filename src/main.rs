//! pip2rpm CLI - build RPMs from Python dependencies
//!
//! Entry point for the pip2rpm command-line application.

use anyhow::Result;
use clap::Parser;

use pip2rpm::cli::output::{display_error, exit_code, OutputConfig};
use pip2rpm::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.apply_global();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run and map failures to an exit status
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(exit_code(&e));
        }
    }
}
