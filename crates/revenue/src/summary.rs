//! Point-in-time summaries (numeric) and their formatted views.

use serde::{Deserialize, Serialize};

use bizforge_core::ProductId;

use crate::format;
use crate::record::ProductRevenueRecord;

/// Numeric snapshot of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub product_name: String,
    pub target_mrr: f64,
    pub annual_run_rate: f64,
    pub active_customers: u64,
    pub churn_rate: f64,
    pub lifetime_value: f64,
    pub total_recorded_revenue: f64,
    pub pricing_min: f64,
    pub pricing_max: f64,
}

impl ProductSummary {
    pub fn from_record(record: &ProductRevenueRecord) -> Self {
        Self {
            product_id: record.product_id.clone(),
            product_name: record.product_name.clone(),
            target_mrr: record.monthly_recurring_revenue,
            annual_run_rate: record.annual_run_rate(),
            active_customers: record.active_customers,
            churn_rate: record.churn_rate,
            lifetime_value: record.lifetime_value,
            total_recorded_revenue: record.total_recorded_revenue(),
            pricing_min: record.pricing_tier_min,
            pricing_max: record.pricing_tier_max,
        }
    }

    pub fn view(&self) -> ProductSummaryView {
        ProductSummaryView {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            target_mrr: self.target_mrr,
            annual_run_rate: self.annual_run_rate,
            active_customers: self.active_customers,
            churn_rate: format::percent(self.churn_rate),
            lifetime_value: format::usd(self.lifetime_value),
            total_recorded_revenue: format::usd(self.total_recorded_revenue),
            pricing_range: format::pricing_range(self.pricing_min, self.pricing_max),
        }
    }
}

/// Human-readable rendering of [`ProductSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummaryView {
    pub product_id: ProductId,
    pub product_name: String,
    pub target_mrr: f64,
    pub annual_run_rate: f64,
    pub active_customers: u64,
    pub churn_rate: String,
    pub lifetime_value: String,
    pub total_recorded_revenue: String,
    pub pricing_range: String,
}

/// Numeric aggregate over every registered product.
///
/// `portfolio` follows the ledger's map iteration order, which is unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_products: usize,
    pub total_mrr: f64,
    pub total_arr: f64,
    pub total_active_customers: u64,
    /// Arithmetic mean of per-product churn; `0` for an empty portfolio.
    pub average_churn_rate: f64,
    pub portfolio: Vec<ProductSummary>,
}

impl PortfolioSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductRevenueRecord>,
    {
        let portfolio: Vec<ProductSummary> =
            records.into_iter().map(ProductSummary::from_record).collect();

        let total_mrr: f64 = portfolio.iter().map(|p| p.target_mrr).sum();
        let total_active_customers = portfolio.iter().map(|p| p.active_customers).sum();
        let average_churn_rate = if portfolio.is_empty() {
            0.0
        } else {
            portfolio.iter().map(|p| p.churn_rate).sum::<f64>() / portfolio.len() as f64
        };

        Self {
            total_products: portfolio.len(),
            total_mrr,
            total_arr: total_mrr * 12.0,
            total_active_customers,
            average_churn_rate,
            portfolio,
        }
    }

    pub fn view(&self) -> PortfolioSummaryView {
        PortfolioSummaryView {
            total_products: self.total_products,
            total_mrr: format::usd(self.total_mrr),
            total_arr: format::usd(self.total_arr),
            total_active_customers: self.total_active_customers,
            average_churn_rate: format::percent(self.average_churn_rate),
            portfolio: self.portfolio.iter().map(ProductSummary::view).collect(),
        }
    }
}

/// Human-readable rendering of [`PortfolioSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummaryView {
    pub total_products: usize,
    pub total_mrr: String,
    pub total_arr: String,
    pub total_active_customers: u64,
    pub average_churn_rate: String,
    pub portfolio: Vec<ProductSummaryView>,
}
