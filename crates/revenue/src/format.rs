//! Presentation formatting for summaries and projections.
//!
//! Computation never goes through here; the `*View` types call these helpers
//! when a human-readable rendering is needed.

use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale_core::Locale;

/// `$1,234.56` style currency. Negative values render as `$-1,234.56`.
pub fn usd(amount: f64) -> String {
    format!("${}", grouped(amount))
}

/// Fixed two-decimal percentage, e.g. `4.76%`.
pub fn percent(rate: f64) -> String {
    format!("{rate:.2}%")
}

/// `$9.00 - $99.00/month`.
pub fn pricing_range(min: f64, max: f64) -> String {
    format!("{} - {}/month", usd(min), usd(max))
}

thread_local! {
    static FORMATTER: Option<DecimalFormatter> = "en-US"
        .parse::<Locale>()
        .ok()
        .and_then(|loc| DecimalFormatter::try_new(loc.into(), DecimalFormatterOptions::default()).ok());
}

/// Two-decimal number with en-US thousands separators.
///
/// Falls back to the ungrouped fixed-point rendering if the formatter is
/// unavailable.
pub fn grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{value:.2}");
    let Ok(decimal) = fixed.parse::<Decimal>() else {
        return fixed;
    };
    FORMATTER.with(|formatter| match formatter {
        Some(f) => f.format(&decimal).to_string(),
        None => fixed,
    })
}
