//! Churn-adjusted MRR projection.
//!
//! Months are approximated as [`DAYS_PER_MONTH`] days. Changing that to
//! calendar months shifts every projected date, so it stays fixed.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::format;
use crate::record::ProductRevenueRecord;

pub const DAYS_PER_MONTH: i64 = 30;
pub const DEFAULT_PROJECTION_MONTHS: u32 = 12;

/// Projected totals for one future month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    /// 1-based month offset from the projection start.
    pub month: u32,
    pub date: DateTime<Utc>,
    pub projected_mrr: f64,
    pub projected_arr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub projection_period_months: u32,
    /// One entry per month, increasing month order.
    pub projections: Vec<MonthlyProjection>,
}

impl RevenueProjection {
    /// Project `months` months ahead of `now` over the given records.
    ///
    /// Each product contributes `target_mrr * (1 - churn/100)^m` to month `m`.
    ///
    /// The horizon stops at the last month whose date chrono can represent;
    /// `projection_period_months` reports the months actually produced.
    pub fn compute<'a, I>(records: I, now: DateTime<Utc>, months: u32) -> Self
    where
        I: IntoIterator<Item = &'a ProductRevenueRecord>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        let projections: Vec<MonthlyProjection> = (1..=months)
            .map_while(|month| {
                let date = TimeDelta::try_days(DAYS_PER_MONTH * i64::from(month))
                    .and_then(|offset| now.checked_add_signed(offset))?;
                let projected_mrr: f64 = records.clone().map(|r| r.decayed_mrr(month)).sum();
                Some(MonthlyProjection {
                    month,
                    date,
                    projected_mrr,
                    projected_arr: projected_mrr * 12.0,
                })
            })
            .collect();

        let produced = u32::try_from(projections.len()).unwrap_or(months);
        if produced < months {
            tracing::warn!(
                requested = months,
                produced,
                "projection horizon truncated at the last representable date"
            );
        }

        Self {
            projection_period_months: produced,
            projections,
        }
    }

    pub fn view(&self) -> RevenueProjectionView {
        RevenueProjectionView {
            projection_period_months: self.projection_period_months,
            projections: self
                .projections
                .iter()
                .map(|p| MonthlyProjectionView {
                    month: p.month,
                    date: p.date,
                    projected_mrr: format::usd(p.projected_mrr),
                    projected_arr: format::usd(p.projected_arr),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjectionView {
    pub month: u32,
    pub date: DateTime<Utc>,
    pub projected_mrr: String,
    pub projected_arr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjectionView {
    pub projection_period_months: u32,
    pub projections: Vec<MonthlyProjectionView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizforge_core::ProductId;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn record(id: &str, mrr: f64, churn: f64) -> ProductRevenueRecord {
        let mut r = ProductRevenueRecord::new(ProductId::from(id), id, 1.0, 2.0, mrr);
        r.churn_rate = churn;
        r
    }

    #[test]
    fn dates_step_by_thirty_days() {
        let records = [record("a", 1_000.0, 0.0)];
        let p = RevenueProjection::compute(&records, fixed_now(), 3);

        assert_eq!(p.projection_period_months, 3);
        assert_eq!(p.projections[0].date, fixed_now() + TimeDelta::days(30));
        assert_eq!(p.projections[2].date, fixed_now() + TimeDelta::days(90));
    }

    #[test]
    fn mixes_decaying_and_flat_products() {
        let records = [record("flat", 1_000.0, 0.0), record("decay", 1_000.0, 50.0)];
        let p = RevenueProjection::compute(&records, fixed_now(), 2);

        assert_eq!(p.projections[0].projected_mrr, 1_500.0);
        assert_eq!(p.projections[1].projected_mrr, 1_250.0);
        assert_eq!(p.projections[1].projected_arr, 15_000.0);
    }

    #[test]
    fn zero_months_is_empty() {
        let records = [record("a", 1_000.0, 5.0)];
        let p = RevenueProjection::compute(&records, fixed_now(), 0);
        assert!(p.projections.is_empty());
    }

    #[test]
    fn horizon_past_the_calendar_range_is_truncated() {
        let records = [record("a", 1_000.0, 10.0)];
        let near_end = DateTime::<Utc>::MAX_UTC - TimeDelta::days(100);
        let p = RevenueProjection::compute(&records, near_end, 10);

        assert_eq!(p.projection_period_months, 3);
        assert_eq!(p.projections.len(), 3);
        assert_eq!(p.projections[2].date, near_end + TimeDelta::days(90));
        assert!((p.projections[2].projected_mrr - 729.0).abs() < 1e-9);
    }

    #[test]
    fn month_offsets_beyond_timedelta_range_do_not_panic() {
        let records = [record("a", 1_000.0, 0.0)];
        let p = RevenueProjection::compute(&records, DateTime::<Utc>::MAX_UTC, u32::MAX);
        assert!(p.projections.is_empty());
        assert_eq!(p.projection_period_months, 0);
    }

    #[test]
    fn view_formats_currency() {
        let records = [record("a", 14_500.0, 0.0)];
        let view = RevenueProjection::compute(&records, fixed_now(), 1).view();
        assert_eq!(view.projections[0].projected_mrr, "$14,500.00");
        assert_eq!(view.projections[0].projected_arr, "$174,000.00");
    }
}
