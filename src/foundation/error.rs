/// Convenience result type used across Lumina.
pub type LuminaResult<T> = Result<T, LuminaError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Cue resolution itself never fails; these variants cover option/layout
/// validation, compilation setup and re-import of exported artifacts.
#[derive(thiserror::Error, Debug)]
pub enum LuminaError {
    /// Invalid user-provided options, layouts or colors.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while setting up or running a show compilation.
    #[error("compile error: {0}")]
    Compile(String),

    /// The artifact carries no marker-delimited project block.
    #[error("no project data found")]
    ProjectDataNotFound,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LuminaError {
    /// Build a [`LuminaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LuminaError::Compile`] value.
    pub fn compile(msg: impl Into<String>) -> Self {
        Self::Compile(msg.into())
    }

    /// Build a [`LuminaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when a re-import failed because no project block was present,
    /// as opposed to a block that was present but malformed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectDataNotFound)
    }
}

impl From<serde_json::Error> for LuminaError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
