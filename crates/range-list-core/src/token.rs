//! Selection token parsing
//!
//! The front end sends a selected range back as the `data-value` it was
//! rendered with: `"A-B"` for a closed range, `"A+"` for "and up", or a bare
//! `"A"`. An upper bound that is empty or zero means "no upper bound".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RangeListError, RangeListResult};
use crate::format::parse_number;
use crate::model::Interval;

/// A raw selected value as received from the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionToken(String);

impl SelectionToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into an [`Interval`].
    pub fn parse(&self) -> RangeListResult<Interval> {
        parse_token(&self.0)
    }
}

impl From<&str> for SelectionToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SelectionToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for SelectionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a selection token into an [`Interval`].
///
/// * `"10-20"` → `[10, 20]`
/// * `"100+"`, `"100"`, `"100-"`, `"100-0"` → `[100, ∞)`
/// * `"-20--10"` → `[-20, -10]` (a leading minus is a sign, not a separator)
///
/// A reversed pair (`"20-10"`) is normalised to `[10, 20]`. A token without a
/// finite numeric lower bound is rejected.
pub fn parse_token(raw: &str) -> RangeListResult<Interval> {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix('+').unwrap_or(trimmed);

    let (from_raw, to_raw) = match separator_index(body) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let from = parse_number(from_raw).ok_or_else(|| RangeListError::InvalidToken(raw.to_string()))?;
    #[allow(clippy::float_cmp)]
    let to = to_raw.and_then(parse_number).filter(|to| *to != 0.0);

    Ok(match to {
        Some(to) if to < from => Interval::closed(to, from),
        Some(to) => Interval::closed(from, to),
        None => Interval::open(from),
    })
}

/// Byte index of the `-` separating lower from upper bound.
///
/// Skips a leading sign and exponent signs (`1e-3`).
fn separator_index(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len()).find(|&idx| {
        bytes[idx] == b'-' && !matches!(bytes[idx - 1], b'e' | b'E')
    })
}
