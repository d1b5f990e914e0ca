//! Human-readable console output.

use bizforge_revenue::PortfolioSummaryView;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Boxed banner: rule, title, rule.
pub fn banner(title: &str) -> String {
    format!("{rule}\n{title}\n{rule}", rule = rule())
}

pub fn portfolio(title: &str, summary: &PortfolioSummaryView) -> String {
    let mut out = banner(title);
    out.push('\n');
    out.push_str(&format!("Total Products: {}\n", summary.total_products));
    out.push_str(&format!("Total MRR: {}\n", summary.total_mrr));
    out.push_str(&format!("Total ARR: {}\n", summary.total_arr));
    out.push_str(&format!(
        "Total Active Customers: {}\n",
        summary.total_active_customers
    ));
    out.push_str(&format!("Average Churn Rate: {}\n", summary.average_churn_rate));
    out.push_str(&rule());
    out
}

pub fn next_steps(repo_url: &str) -> String {
    [
        "📋 NEXT STEPS:".to_string(),
        format!("1. Repository: {repo_url}"),
        "2. Set up GitHub Actions for CI/CD".to_string(),
        "3. Configure payment webhooks (Stripe/PayPal)".to_string(),
        "4. Deploy to Kubernetes".to_string(),
        "5. Monitor revenue streams".to_string(),
    ]
    .join("\n")
}
