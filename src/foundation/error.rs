/// Convenience result type used across quotecard.
pub type QuoteCardResult<T> = Result<T, QuoteCardError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum QuoteCardError {
    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Avatar could not be fetched or decoded in time.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A draw op failed while painting the surface.
    #[error("drawing error: {0}")]
    Drawing(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuoteCardError {
    /// Build a [`QuoteCardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuoteCardError::Drawing`] value.
    pub fn drawing(msg: impl Into<String>) -> Self {
        Self::Drawing(msg.into())
    }

    /// Build a [`QuoteCardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Recoverable avatar load failures.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// Fetch plus decode did not finish inside the timeout window.
    #[error("image loading timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// Network, IO or decode failure before the timeout.
    #[error("failed to load image: {0}")]
    Failed(String),
}

impl LoadError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
