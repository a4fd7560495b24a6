/// Convenience result type used across adreel.
pub type AdreelResult<T> = Result<T, AdreelError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum AdreelError {
    /// Malformed descriptor data, raised when a composition is loaded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Errors while evaluating or delivering frame state.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// JSON that failed to parse or serialize.
    #[error("serialization error: {0}")]
    Serde(String),

    /// IO failures from output sinks, with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdreelError {
    /// Build an [`AdreelError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build an [`AdreelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// True for errors raised while loading descriptors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for AdreelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
