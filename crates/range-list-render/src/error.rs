//! Error types for facet rendering

use range_list_core::RangeListError;
use thiserror::Error;

/// Result type alias for rendering
pub type RenderResult<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Template lookup or evaluation failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl RenderError {
    /// Returns the error type string (for JSON responses)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Template(_) => "TEMPLATE_ERROR",
        }
    }
}

impl From<RenderError> for RangeListError {
    fn from(err: RenderError) -> Self {
        Self::Render(err.to_string())
    }
}
