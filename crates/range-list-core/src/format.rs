//! Number formatting seam
//!
//! Localised number formatting belongs to the host. The crate only needs two
//! things: a canonical spelling for numbers that end up in selection tokens
//! and SQL (never localised), and a pluggable [`ValueFormatter`] for the
//! human-facing range labels.

/// Formats a bound for display in an auto-generated range label.
pub trait ValueFormatter: Send + Sync {
    fn format_value(&self, value: f64) -> String;
}

/// Default formatter: canonical spelling, no grouping or currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl ValueFormatter for PlainFormatter {
    fn format_value(&self, value: f64) -> String {
        format_number(value)
    }
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String + Send + Sync,
{
    fn format_value(&self, value: f64) -> String {
        self(value)
    }
}

/// Largest magnitude at which every integral `f64` is still printed exactly.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Canonical number spelling used in tokens and SQL.
///
/// Integral values print without a fractional part (`50`, not `50.0`) and
/// negative zero prints as `0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Parse a user- or admin-supplied number.
///
/// Surrounding whitespace is ignored. Empty strings and non-finite values
/// (`inf`, `NaN`) yield `None`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
