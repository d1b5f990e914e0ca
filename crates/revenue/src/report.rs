//! Full-report export (the ledger's only I/O boundary).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use bizforge_core::ProductId;

use crate::ledger::Ledger;
use crate::projection::{DEFAULT_PROJECTION_MONTHS, RevenueProjectionView};
use crate::record::ProductRevenueRecord;
use crate::summary::PortfolioSummaryView;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize revenue report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write revenue report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Snapshot written by [`Ledger::export_report`].
///
/// Summaries and projections are the formatted views; `products` is the raw
/// record dump including nested transaction histories, keyed by product id.
#[derive(Debug, Serialize)]
pub struct RevenueReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub portfolio_summary: PortfolioSummaryView,
    pub revenue_projections: RevenueProjectionView,
    pub products: BTreeMap<&'a ProductId, &'a ProductRevenueRecord>,
}

impl Ledger {
    pub fn report_at(&self, generated_at: DateTime<Utc>) -> RevenueReport<'_> {
        RevenueReport {
            generated_at,
            portfolio_summary: self.get_portfolio_summary().view(),
            revenue_projections: self
                .project_revenue_from(generated_at, DEFAULT_PROJECTION_MONTHS)
                .view(),
            products: self.products().iter().collect(),
        }
    }

    pub fn try_export_report(&self, destination: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = destination.as_ref();
        let json = serde_json::to_string_pretty(&self.report_at(Utc::now()))?;
        std::fs::write(path, json).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the report as JSON. Failures are logged and reported as `false`.
    pub fn export_report(&self, destination: impl AsRef<Path>) -> bool {
        let path = destination.as_ref();
        match self.try_export_report(path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "revenue report exported");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "✗ error exporting report");
                false
            }
        }
    }
}
