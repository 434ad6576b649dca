use thiserror::Error;

/// Recoverable failures surfaced by the garden engines and service.
///
/// Service methods return `anyhow::Result`; callers that need to branch on the
/// kind use `err.downcast_ref::<GardenError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GardenError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    /// A referenced plant, user or session is absent.
    #[error("{0}")]
    NotFound(String),
    /// An action attempted outside the triage's current state.
    #[error("{0}")]
    State(String),
}

impl GardenError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}

/// Classify an `anyhow` error produced by this crate.
#[must_use]
pub fn kind_of(err: &anyhow::Error) -> Option<&GardenError> {
    err.downcast_ref::<GardenError>()
}
