use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Stored blob is not JSON or has the wrong shape. Recovered with
    /// empty defaults and never shown to the user.
    #[error("stored chat state is malformed: {0}")]
    PersistenceParse(String),

    #[error("failed to read file '{name}': {reason}")]
    Read { name: String, reason: String },

    #[error("storage write failed: {0}")]
    Storage(String),

    /// A required page element or browser API is unavailable. Fatal at startup.
    #[error("required view region '{0}' is missing")]
    MissingRegion(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
