use serde::{Deserialize, Serialize};

use bizforge_core::{Entity, ProductId};

use crate::metric::RevenueMetric;

/// Per-product revenue state held by the ledger.
///
/// `pricing_tier_min`/`pricing_tier_max` are informational and never checked
/// against each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenueRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub pricing_tier_min: f64,
    pub pricing_tier_max: f64,
    /// Target MRR, fixed at registration.
    pub monthly_recurring_revenue: f64,
    pub active_customers: u64,
    /// Percentage (0 to 100 expected, not enforced by default).
    pub churn_rate: f64,
    pub lifetime_value: f64,
    /// Append-only, in recording order.
    pub revenue_history: Vec<RevenueMetric>,
}

impl ProductRevenueRecord {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        pricing_tier_min: f64,
        pricing_tier_max: f64,
        monthly_recurring_revenue: f64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            pricing_tier_min,
            pricing_tier_max,
            monthly_recurring_revenue,
            active_customers: 0,
            churn_rate: 0.0,
            lifetime_value: 0.0,
            revenue_history: Vec::new(),
        }
    }

    /// Target MRR annualized (`* 12`).
    pub fn annual_run_rate(&self) -> f64 {
        self.monthly_recurring_revenue * 12.0
    }

    /// Sum of every transaction amount recorded for this product.
    pub fn total_recorded_revenue(&self) -> f64 {
        self.revenue_history.iter().map(|m| m.amount).sum()
    }

    /// Target MRR after `months` of compounding churn.
    pub fn decayed_mrr(&self, months: u32) -> f64 {
        let retention = 1.0 - self.churn_rate / 100.0;
        let factor = match i32::try_from(months) {
            Ok(n) => retention.powi(n),
            Err(_) => retention.powf(f64::from(months)),
        };
        self.monthly_recurring_revenue * factor
    }
}

impl Entity for ProductRevenueRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}
