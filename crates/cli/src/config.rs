//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bizforge_infra::github::DEFAULT_API_URL;

pub const DEFAULT_PRODUCT: &str = "mesh-messenger";
pub const DEFAULT_REPORT_PATH: &str = "revenue_report.json";

#[derive(Debug, Parser)]
#[command(
    name = "bizforge",
    version,
    about = "Render, publish and track revenue for template-built products"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a product line, create its GitHub repository, push it, and register its revenue.
    Launch(LaunchArgs),
    /// Seed the revenue ledger with sample products, print the portfolio, export a report.
    Demo(DemoArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LaunchArgs {
    /// Catalog key of the product line to launch
    #[arg(default_value = DEFAULT_PRODUCT)]
    pub product: String,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Directory under which products are rendered (defaults to the system temp dir)
    #[arg(long, env = "BIZFORGE_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Extra product lines (TOML, `[[product]]` tables)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Create the repository as private
    #[arg(long)]
    pub private: bool,

    /// Export a revenue report here after launching
    #[arg(long, env = "BIZFORGE_REPORT")]
    pub report: Option<PathBuf>,

    /// Stripe key (recorded as configured only; no payment integration)
    #[arg(long, env = "STRIPE_API_KEY", hide_env_values = true)]
    pub stripe_api_key: Option<String>,

    /// PayPal client id (recorded as configured only; no payment integration)
    #[arg(long, env = "PAYPAL_CLIENT_ID", hide_env_values = true)]
    pub paypal_client_id: Option<String>,
}

impl LaunchArgs {
    /// Token, if present and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn workdir(&self) -> PathBuf {
        self.workdir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DemoArgs {
    /// Where to write the JSON report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Reject negative amounts, inverted pricing and out-of-range churn
    #[arg(long)]
    pub strict: bool,
}
