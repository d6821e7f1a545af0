//! Error types for range list facets

use thiserror::Error;

/// Result type alias for range list operations
pub type RangeListResult<T> = std::result::Result<T, RangeListError>;

/// Errors that can occur while loading settings or building facet output.
///
/// The core algorithms themselves are permissive: absent bounds, empty labels
/// and unparseable selection tokens are not errors. These variants cover the
/// edges where host-supplied data cannot be used at all.
#[derive(Debug, Error)]
pub enum RangeListError {
    /// Facet settings were structurally invalid (e.g. missing name)
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A selection token could not be parsed into an interval
    #[error("Invalid selection token: {0:?}")]
    InvalidToken(String),

    /// The host asked for a facet type that is not registered
    #[error("Unknown facet type: {0}")]
    UnknownFacetType(String),

    /// HTML rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RangeListError {
    /// Returns the error type string (for JSON responses)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidSettings(_) => "INVALID_SETTINGS",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::UnknownFacetType(_) => "UNKNOWN_FACET_TYPE",
            Self::Render(_) => "RENDER_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
