use clap::Parser;

use bizforge_cli::commands;
use bizforge_cli::config::Cli;

#[tokio::main]
async fn main() {
    bizforge_observability::init();

    let cli = Cli::parse();

    // Failures are reported on the console; the exit status stays 0.
    if let Err(e) = commands::run(cli.command).await {
        tracing::error!(error = ?e, "bizforge command failed");
        println!("✗ {e:#}");
    }
}
