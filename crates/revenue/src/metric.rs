use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bizforge_core::{ProductId, ValueObject};

/// Currency code applied to every recorded transaction.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Kind of revenue stream a transaction belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueStream {
    #[default]
    SaasSubscription,
    UsageBased,
    EnterpriseLicense,
    Marketplace,
}

impl RevenueStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueStream::SaasSubscription => "saas_subscription",
            RevenueStream::UsageBased => "usage_based",
            RevenueStream::EnterpriseLicense => "enterprise_license",
            RevenueStream::Marketplace => "marketplace",
        }
    }
}

impl core::fmt::Display for RevenueStream {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded transaction (immutable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueMetric {
    pub stream_kind: RevenueStream,
    /// Currency units. Sign is not checked by the permissive policy.
    pub amount: f64,
    pub currency: String,
    pub recorded_at: DateTime<Utc>,
    pub source_product: ProductId,
}

impl RevenueMetric {
    pub fn new(
        source_product: ProductId,
        amount: f64,
        stream_kind: RevenueStream,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stream_kind,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            recorded_at,
            source_product,
        }
    }
}

impl ValueObject for RevenueMetric {}
