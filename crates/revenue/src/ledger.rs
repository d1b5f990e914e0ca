use std::collections::HashMap;

use chrono::{DateTime, Utc};

use bizforge_core::{AggregateRoot, DomainResult, LedgerId, ProductId};

use crate::format;
use crate::metric::{RevenueMetric, RevenueStream};
use crate::policy::{InputPolicy, NumericInput};
use crate::projection::RevenueProjection;
use crate::record::ProductRevenueRecord;
use crate::summary::{PortfolioSummary, ProductSummary};

/// Observation window assumed by churn callers. Accepted but not used in the math.
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Customer lifespan assumed by LTV callers.
pub const DEFAULT_LIFESPAN_MONTHS: u32 = 24;

/// Aggregate root: Ledger (per-product revenue records + global transaction log).
///
/// Lookups of unknown products fail softly (`false` / `None`). The churn and
/// LTV calculators always return a number and only persist it when the product
/// is registered.
#[derive(Debug, Clone)]
pub struct Ledger {
    id: LedgerId,
    version: u64,
    created_at: DateTime<Utc>,
    policy: InputPolicy,
    products: HashMap<ProductId, ProductRevenueRecord>,
    history: Vec<RevenueMetric>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_policy(InputPolicy::default())
    }

    pub fn with_policy(policy: InputPolicy) -> Self {
        Self {
            id: LedgerId::new(),
            version: 0,
            created_at: Utc::now(),
            policy,
            products: HashMap::new(),
            history: Vec::new(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn product(&self, product_id: &str) -> Option<&ProductRevenueRecord> {
        self.products.get(product_id)
    }

    pub fn products(&self) -> &HashMap<ProductId, ProductRevenueRecord> {
        &self.products
    }

    /// Every recorded transaction across all products, in recording order.
    pub fn history(&self) -> &[RevenueMetric] {
        &self.history
    }

    /// Create the record for `product_id`, replacing (not merging) any existing one.
    ///
    /// Re-registration drops the previous record's history from the product;
    /// the ledger-wide history keeps it.
    pub fn register_product(
        &mut self,
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        pricing_min: f64,
        pricing_max: f64,
        target_mrr: f64,
    ) -> DomainResult<&ProductRevenueRecord> {
        self.policy.check(NumericInput::PricingRange {
            min: pricing_min,
            max: pricing_max,
        })?;
        self.policy.check(NumericInput::TargetMrr(target_mrr))?;

        let product_id = product_id.into();
        let record = ProductRevenueRecord::new(
            product_id.clone(),
            product_name,
            pricing_min,
            pricing_max,
            target_mrr,
        );

        tracing::info!(
            product_id = %product_id,
            product_name = %record.product_name,
            target_mrr = %format::usd(target_mrr),
            annual_run_rate = %format::usd(record.annual_run_rate()),
            "✓ registered product"
        );

        self.version += 1;
        self.products.insert(product_id.clone(), record);
        Ok(&self.products[&product_id])
    }

    /// Append a transaction stamped with the current time.
    pub fn record_transaction(
        &mut self,
        product_id: &str,
        amount: f64,
        stream_kind: RevenueStream,
    ) -> bool {
        self.record_transaction_at(product_id, amount, stream_kind, Utc::now())
    }

    pub fn record_transaction_at(
        &mut self,
        product_id: &str,
        amount: f64,
        stream_kind: RevenueStream,
        recorded_at: DateTime<Utc>,
    ) -> bool {
        let Some(record) = self.products.get_mut(product_id) else {
            tracing::warn!(product_id, "transaction for unknown product ignored");
            return false;
        };

        if let Err(e) = self.policy.check(NumericInput::TransactionAmount(amount)) {
            tracing::warn!(product_id, error = %e, "transaction rejected");
            return false;
        }

        let metric = RevenueMetric::new(
            record.product_id.clone(),
            amount,
            stream_kind,
            recorded_at,
        );
        record.revenue_history.push(metric.clone());
        self.history.push(metric);
        self.version += 1;
        true
    }

    pub fn update_customer_count(&mut self, product_id: &str, count: u64) -> bool {
        match self.products.get_mut(product_id) {
            Some(record) => {
                record.active_customers = count;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Percentage of customers lost between two counts.
    ///
    /// `period_days` does not take part in the calculation.
    pub fn calculate_churn_rate(
        &mut self,
        product_id: &str,
        previous_customers: u64,
        current_customers: u64,
        _period_days: u32,
    ) -> f64 {
        if previous_customers == 0 {
            return 0.0;
        }

        let churned = previous_customers.saturating_sub(current_customers);
        let rate = churned as f64 / previous_customers as f64 * 100.0;

        self.store(product_id, NumericInput::ChurnRate(rate), |r| {
            r.churn_rate = rate
        });
        rate
    }

    /// Undiscounted lifetime value: monthly revenue times lifespan.
    pub fn calculate_ltv(
        &mut self,
        product_id: &str,
        avg_monthly_revenue: f64,
        avg_customer_lifespan_months: u32,
    ) -> f64 {
        let ltv = avg_monthly_revenue * f64::from(avg_customer_lifespan_months);

        self.store(product_id, NumericInput::LifetimeValue(ltv), |r| {
            r.lifetime_value = ltv
        });
        ltv
    }

    pub fn get_product_summary(&self, product_id: &str) -> Option<ProductSummary> {
        self.products.get(product_id).map(ProductSummary::from_record)
    }

    pub fn get_portfolio_summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_records(self.products.values())
    }

    /// Project `months` months ahead of now. Does not mutate the ledger.
    pub fn project_revenue(&self, months: u32) -> RevenueProjection {
        self.project_revenue_from(Utc::now(), months)
    }

    pub fn project_revenue_from(&self, now: DateTime<Utc>, months: u32) -> RevenueProjection {
        RevenueProjection::compute(self.products.values(), now, months)
    }

    /// Persist a computed value on a registered product, if the policy admits it.
    fn store(
        &mut self,
        product_id: &str,
        input: NumericInput,
        update: impl FnOnce(&mut ProductRevenueRecord),
    ) {
        let Some(record) = self.products.get_mut(product_id) else {
            return;
        };
        match self.policy.check(input) {
            Ok(()) => {
                update(record);
                self.version += 1;
            }
            Err(e) => tracing::warn!(product_id, error = %e, "computed value not stored"),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateRoot for Ledger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
