//! `bizforge` subcommands.

use anyhow::Context;

use bizforge_core::DomainResult;
use bizforge_infra::{FsRenderer, GitHubClient, GitPusher};
use bizforge_revenue::{DEFAULT_LIFESPAN_MONTHS, DEFAULT_PERIOD_DAYS, InputPolicy, Ledger};

use crate::catalog::Catalog;
use crate::config::{Command, DemoArgs, LaunchArgs};
use crate::orchestrator::Orchestrator;
use crate::output;

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Launch(args) => launch(args).await,
        Command::Demo(args) => demo(args),
    }
}

/// Launch one product line end to end and print the resulting portfolio.
///
/// A missing token is reported and treated as a normal exit.
pub async fn launch(args: LaunchArgs) -> anyhow::Result<()> {
    let Some(token) = args.token() else {
        println!("✗ GITHUB_TOKEN environment variable not set");
        println!("  Set it with: export GITHUB_TOKEN='your_token_here'");
        return Ok(());
    };

    tracing::info!(
        stripe = args.stripe_api_key.is_some(),
        paypal = args.paypal_client_id.is_some(),
        "payment processors configured (not integrated)"
    );

    let mut catalog = Catalog::builtin();
    if let Some(path) = &args.catalog {
        catalog.merge(
            Catalog::from_file(path)
                .with_context(|| format!("loading catalog {}", path.display()))?,
        );
    }

    let host = GitHubClient::with_api_url(args.github_api_url.as_str(), token)
        .context("building GitHub client")?;
    let mut orchestrator = Orchestrator::new(
        FsRenderer,
        host,
        GitPusher::new(),
        catalog,
        args.workdir(),
        Ledger::new(),
    )
    .with_public_repositories(!args.private);

    let title = format!("CREATING NEW PRODUCT LINE: {}", args.product.to_uppercase());
    println!("{}", output::banner(&title));

    if orchestrator.create_product_line(&args.product).await.is_none() {
        println!("✗ Failed to create product line");
        return Ok(());
    }

    let summary = orchestrator.portfolio_summary();
    println!();
    println!("{}", output::portfolio("PORTFOLIO SUMMARY", &summary.portfolio.view()));

    if let Some(launched) = orchestrator.launched().get(&args.product) {
        println!();
        println!("{}", output::next_steps(&launched.repo_url));
    }

    if let Some(report) = &args.report {
        if orchestrator.ledger().export_report(report) {
            println!("✓ Report exported to {}", report.display());
        } else {
            println!("✗ Report export failed: {}", report.display());
        }
    }

    Ok(())
}

/// Sample portfolio: two product lines with customers, churn and LTV.
pub fn seed_demo(ledger: &mut Ledger) -> DomainResult<()> {
    ledger.register_product("mesh-messenger", "Zero-Human Mesh Messenger", 9.0, 99.0, 14_500.0)?;
    ledger.register_product(
        "governance-platform",
        "Zero-Human AI Governance Platform",
        299.0,
        1_999.0,
        50_000.0,
    )?;

    ledger.update_customer_count("mesh-messenger", 2_000);
    ledger.update_customer_count("governance-platform", 50);

    ledger.calculate_churn_rate("mesh-messenger", 2_100, 2_000, DEFAULT_PERIOD_DAYS);
    ledger.calculate_churn_rate("governance-platform", 52, 50, DEFAULT_PERIOD_DAYS);

    // $7.25/customer/month
    ledger.calculate_ltv("mesh-messenger", 72.50, DEFAULT_LIFESPAN_MONTHS);
    ledger.calculate_ltv("governance-platform", 1_000.0, DEFAULT_LIFESPAN_MONTHS);
    Ok(())
}

pub fn demo(args: DemoArgs) -> anyhow::Result<()> {
    let policy = if args.strict {
        InputPolicy::Strict
    } else {
        InputPolicy::Permissive
    };
    let mut ledger = Ledger::with_policy(policy);
    seed_demo(&mut ledger).context("seeding demo portfolio")?;

    println!();
    println!(
        "{}",
        output::portfolio("PORTFOLIO REVENUE SUMMARY", &ledger.get_portfolio_summary().view())
    );

    if ledger.export_report(&args.report) {
        println!("\n✓ Report exported to {}", args.report.display());
    } else {
        println!("\n✗ Report export failed: {}", args.report.display());
    }
    Ok(())
}
