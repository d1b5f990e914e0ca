//! Revenue module (in-memory revenue ledger, projections, reporting).
//!
//! Pure domain logic except for [`Ledger::export_report`], which is the single
//! filesystem boundary.

pub mod format;
pub mod ledger;
pub mod metric;
pub mod policy;
pub mod projection;
pub mod record;
pub mod report;
pub mod summary;

pub use ledger::{DEFAULT_LIFESPAN_MONTHS, DEFAULT_PERIOD_DAYS, Ledger};
pub use metric::{DEFAULT_CURRENCY, RevenueMetric, RevenueStream};
pub use policy::{InputPolicy, NumericInput};
pub use projection::{
    DAYS_PER_MONTH, DEFAULT_PROJECTION_MONTHS, MonthlyProjection, MonthlyProjectionView,
    RevenueProjection, RevenueProjectionView,
};
pub use record::ProductRevenueRecord;
pub use report::{ExportError, RevenueReport};
pub use summary::{PortfolioSummary, PortfolioSummaryView, ProductSummary, ProductSummaryView};
