/// Result alias used across the crate.
pub type HeroResult<T> = Result<T, HeroError>;

/// Error type for configuration, preload, transition and reveal failures.
///
/// Recoverable runtime conditions (advance while locked, stale completion, entries for
/// sections that are no longer observed) are reported as outcome values, not errors.
#[derive(thiserror::Error, Debug)]
pub enum HeroError {
    /// Invalid configuration or asset pool.
    #[error("config error: {0}")]
    Config(String),

    /// Misuse of the preload tracker (e.g. unknown probe index).
    #[error("preload error: {0}")]
    Preload(String),

    /// Misuse of the transition machinery.
    #[error("transition error: {0}")]
    Transition(String),

    /// Misuse of the reveal engine or its geometry.
    #[error("reveal error: {0}")]
    Reveal(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeroError {
    /// Build a [`HeroError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`HeroError::Preload`].
    pub fn preload(msg: impl Into<String>) -> Self {
        Self::Preload(msg.into())
    }

    /// Build a [`HeroError::Transition`].
    pub fn transition(msg: impl Into<String>) -> Self {
        Self::Transition(msg.into())
    }

    /// Build a [`HeroError::Reveal`].
    pub fn reveal(msg: impl Into<String>) -> Self {
        Self::Reveal(msg.into())
    }

    /// Build a [`HeroError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
