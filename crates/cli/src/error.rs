use dca_calculator_core::errors::CoreError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(CoreError::Validation(_)) => 2,
            Self::Core(e) if e.is_backend_failure() => 3,
            Self::Core(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
