//! Numeric input checks applied by the ledger before it persists anything.
//!
//! Every number a caller hands to the ledger passes through
//! [`InputPolicy::check`]. The default policy accepts everything, including
//! negative amounts, churn outside 0..=100 and inverted pricing bounds.
//! [`InputPolicy::Strict`] is an opt-in extension for hosts that want those
//! inputs rejected instead.

use serde::{Deserialize, Serialize};

use bizforge_core::{DomainError, DomainResult};

/// A numeric input, tagged with what it means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericInput {
    TransactionAmount(f64),
    TargetMrr(f64),
    PricingRange { min: f64, max: f64 },
    ChurnRate(f64),
    LifetimeValue(f64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Accept every input as-is.
    #[default]
    Permissive,
    /// Reject non-finite, negative and out-of-range inputs.
    Strict,
}

impl InputPolicy {
    pub fn check(self, input: NumericInput) -> DomainResult<()> {
        match self {
            InputPolicy::Permissive => Ok(()),
            InputPolicy::Strict => check_strict(input),
        }
    }
}

fn check_strict(input: NumericInput) -> DomainResult<()> {
    match input {
        NumericInput::TransactionAmount(v) => non_negative("transaction amount", v),
        NumericInput::TargetMrr(v) => non_negative("target MRR", v),
        NumericInput::LifetimeValue(v) => non_negative("lifetime value", v),
        NumericInput::ChurnRate(v) => {
            finite("churn rate", v)?;
            if !(0.0..=100.0).contains(&v) {
                return Err(DomainError::validation(format!(
                    "churn rate must be within 0..=100 (got {v})"
                )));
            }
            Ok(())
        }
        NumericInput::PricingRange { min, max } => {
            non_negative("pricing minimum", min)?;
            non_negative("pricing maximum", max)?;
            if min > max {
                return Err(DomainError::validation(format!(
                    "pricing minimum {min} exceeds maximum {max}"
                )));
            }
            Ok(())
        }
    }
}

fn finite(what: &str, v: f64) -> DomainResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(DomainError::validation(format!("{what} must be finite")))
    }
}

fn non_negative(what: &str, v: f64) -> DomainResult<()> {
    finite(what, v)?;
    if v < 0.0 {
        return Err(DomainError::validation(format!(
            "{what} cannot be negative (got {v})"
        )));
    }
    Ok(())
}
