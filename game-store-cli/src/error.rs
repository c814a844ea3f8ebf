use game_store_lib::{ShopError, StoreError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A facade operation failed; shown with its user-facing message
    #[error("{}", .0.user_message())]
    Shop(#[from] ShopError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Process exit code: 1 for problems the user can fix, 2 otherwise.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Shop(e) if e.is_recoverable() => 1,
            _ => 2,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Shop(err.into())
    }
}
