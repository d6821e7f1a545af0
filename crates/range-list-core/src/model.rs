//! Range list data model
//!
//! [`Level`] is what an admin configures, [`ResolvedRange`] is what the
//! boundary resolver derives from it, [`FactRow`] is one row of the host's
//! numeric index and [`Interval`] is a parsed selection.

use serde::{Deserialize, Deserializer, Serialize};

use crate::format::{ValueFormatter, format_number, parse_number};

// ── Level ───────────────────────────────────────────────────────────────────

/// One configured range definition.
///
/// Every field is optional: a missing bound is derived from neighbouring
/// levels, a missing label is generated from the resolved bounds. Settings
/// saved by the admin screen store bounds as strings (`"50"`, `""`), so
/// deserialization accepts numbers, numeric strings, `null` and `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(
        default,
        deserialize_with = "lenient_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
}

impl Level {
    /// A level with the given bounds and no label.
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            label: None,
        }
    }

    /// A level with neither bound set; both are inferred from neighbours.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(None, None)
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.is_empty() { None } else { Some(label) };
        self
    }

    /// Explicit value for one side of the level.
    #[must_use]
    pub const fn bound(&self, side: BoundSide) -> Option<f64> {
        match side {
            BoundSide::Min => self.min,
            BoundSide::Max => self.max,
        }
    }
}

/// Which end of a range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundSide {
    Min,
    Max,
}

impl BoundSide {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Min => Self::Max,
            Self::Max => Self::Min,
        }
    }
}

// ── ResolvedRange ───────────────────────────────────────────────────────────

/// A level after boundary inference, with its row count.
///
/// `None` on either side means that side is open (unbounded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Explicit label from the level, if one was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Number of index rows inside the range.
    #[serde(default)]
    pub count: usize,
}

impl ResolvedRange {
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            label: None,
            count: 0,
        }
    }

    /// Whether a value falls inside the range (both closed ends inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// The selection token this range is offered under.
    ///
    /// An "up to" range is encoded with a zero lower bound (`0-{max}`), the
    /// same encoding the front end has always sent back. The "All" range has
    /// no token because selecting it filters nothing.
    ///
    /// A negative "up to" max yields a token such as `0--10`, which parses
    /// back as `[-10, 0]` rather than the counted `(-inf, -10]`.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(format!(
                "{}-{}",
                format_number(min),
                format_number(max)
            )),
            (None, Some(max)) => {
                if max < 0.0 {
                    tracing::warn!(max, "negative \"up to\" bound does not round-trip");
                }
                Some(format!("0-{}", format_number(max)))
            }
            (Some(min), None) => Some(format!("{}+", format_number(min))),
            (None, None) => None,
        }
    }

    /// Label generated from the resolved bounds.
    #[must_use]
    pub fn auto_label(&self, formatter: &dyn ValueFormatter) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!(
                "{} - {}",
                formatter.format_value(min),
                formatter.format_value(max)
            ),
            (None, Some(max)) => format!("Up to {}", formatter.format_value(max)),
            (Some(min), None) => format!("{} and up", formatter.format_value(min)),
            (None, None) => "All".to_string(),
        }
    }

    /// The configured label, falling back to [`auto_label`](Self::auto_label).
    #[must_use]
    pub fn display_label(&self, formatter: &dyn ValueFormatter) -> String {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.auto_label(formatter),
        }
    }
}

// ── FactRow ─────────────────────────────────────────────────────────────────

/// One `(facet_value, post_id)` row from the host's index table.
///
/// Database drivers commonly hand numeric columns back as strings, so both
/// fields accept either representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactRow {
    #[serde(alias = "facet_value", deserialize_with = "number_or_string")]
    pub value: f64,
    #[serde(deserialize_with = "id_or_string")]
    pub post_id: u64,
}

impl FactRow {
    #[must_use]
    pub const fn new(value: f64, post_id: u64) -> Self {
        Self { value, post_id }
    }
}

// ── Interval ────────────────────────────────────────────────────────────────

/// A parsed selection: `from <= value [<= to]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub from: f64,
    /// `None` means the interval is open upward ("and up").
    pub to: Option<f64>,
}

impl Interval {
    #[must_use]
    pub const fn closed(from: f64, to: f64) -> Self {
        Self { from, to: Some(to) }
    }

    #[must_use]
    pub const fn open(from: f64) -> Self {
        Self { from, to: None }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.to.is_none()
    }

    /// Inclusive membership test.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.from && self.to.is_none_or(|to| value <= to)
    }

    /// Encode back into the selection token syntax.
    #[must_use]
    pub fn to_token(&self) -> String {
        match self.to {
            Some(to) => format!("{}-{}", format_number(self.from), format_number(to)),
            None => format!("{}+", format_number(self.from)),
        }
    }
}

// ── Lenient deserializers ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
}

fn lenient_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawScalar::Number(n)) => Some(n).filter(|n| n.is_finite()),
        Some(RawScalar::Text(text)) => parse_number(&text),
    })
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|label| !label.trim().is_empty()))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Number(n) if n.is_finite() => Ok(n),
        RawScalar::Number(n) => Err(serde::de::Error::custom(format!(
            "non-finite facet value {n}"
        ))),
        RawScalar::Text(text) => parse_number(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("facet value {text:?} is not a number"))
        }),
    }
}

fn id_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Id(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Id(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("post id {text:?} is not an id"))),
    }
}
