//! Per-facet settings
//!
//! The host stores one settings object per facet:
//!
//! ```json
//! {
//!   "name": "price",
//!   "type": "range_list",
//!   "source": "cf/price",
//!   "input_type": "checkbox",
//!   "operator": "or",
//!   "levels": [{"min": "", "max": "50", "label": ""}, {"min": "50"}]
//! }
//! ```
//!
//! Settings files edited by hand are accepted as JSON5 as well.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{RangeListError, RangeListResult};
use crate::model::Level;

/// Registry key of the range list facet type.
pub const RANGE_LIST_TYPE: &str = "range_list";

/// Default facet label shown in the host's admin screens.
pub const DEFAULT_FACET_LABEL: &str = "Range List";

// ── Input mode ──────────────────────────────────────────────────────────────

/// How users pick ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Single select; the selection is parsed directly, never merged.
    #[default]
    Radio,
    /// Multi select; selections are merged before building SQL.
    Checkbox,
}

impl InputMode {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "radio" => Some(Self::Radio),
            "checkbox" | "checkboxes" => Some(Self::Checkbox),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }

    #[must_use]
    pub const fn is_multi_select(self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InputMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            if !raw.is_empty() {
                tracing::warn!(input_type = %raw, "unknown input type, using radio");
            }
            Self::Radio
        }))
    }
}

// ── Operator ────────────────────────────────────────────────────────────────

/// How this facet's matches combine with other facets on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    And,
    #[default]
    Or,
}

impl Operator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

// ── Settings ────────────────────────────────────────────────────────────────

/// Settings for one range list facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSettings {
    /// Facet identifier; also the `facet_name` column value in the index.
    pub name: String,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(rename = "type", default = "default_type")]
    pub facet_type: String,
    /// Host data source the index was built from. Passed through untouched.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub input_type: InputMode,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub levels: Vec<Level>,
}

fn default_label() -> String {
    DEFAULT_FACET_LABEL.to_string()
}

fn default_type() -> String {
    RANGE_LIST_TYPE.to_string()
}

impl FacetSettings {
    /// Create settings for a radio facet with no levels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: default_label(),
            facet_type: default_type(),
            source: String::new(),
            input_type: InputMode::default(),
            operator: Operator::default(),
            levels: Vec::new(),
        }
    }

    /// Set the input mode
    #[must_use]
    pub fn with_input_type(mut self, input_type: InputMode) -> Self {
        self.input_type = input_type;
        self.normalized()
    }

    /// Set the levels
    #[must_use]
    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }

    /// Set the data source
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Parse settings from JSON, falling back to JSON5 for hand-edited files.
    ///
    /// The result is validated and normalized.
    pub fn from_json(text: &str) -> RangeListResult<Self> {
        let value = parse_json_or_json5(text)?;
        Self::from_value(value)
    }

    /// Build settings from an already-parsed JSON value.
    pub fn from_value(value: Value) -> RangeListResult<Self> {
        let settings: Self = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings.normalized())
    }

    /// Reject settings that cannot produce a usable facet.
    pub fn validate(&self) -> RangeListResult<()> {
        if self.name.trim().is_empty() {
            return Err(RangeListError::InvalidSettings(
                "facet name must not be empty".to_string(),
            ));
        }
        if self.facet_type != RANGE_LIST_TYPE {
            return Err(RangeListError::InvalidSettings(format!(
                "facet {:?} has type {:?}, expected {RANGE_LIST_TYPE:?}",
                self.name, self.facet_type
            )));
        }
        Ok(())
    }

    /// Multi-select facets always combine their own choices with OR.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.input_type.is_multi_select() {
            self.operator = Operator::Or;
        }
        self
    }
}

fn parse_json_or_json5(text: &str) -> RangeListResult<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(doc) => Ok(doc),
        Err(json_error) => match json5::from_str::<Value>(text) {
            Ok(doc) => Ok(doc),
            Err(json5_error) => Err(RangeListError::InvalidSettings(format!(
                "not JSON ({json_error}) nor JSON5 ({json5_error})"
            ))),
        },
    }
}
