use supplychain_core::ErrorKind;
use supplychain_generate::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Store(#[from] supplychain_core::Error),
    #[error("generation error: {0}")]
    Generation(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GenerationError> for CliError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Store(inner) => CliError::Store(inner),
            other => CliError::Generation(other.to_string()),
        }
    }
}

impl CliError {
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Config(_) | CliError::Logging(_) => "config",
            CliError::Store(err) => err.kind().as_str(),
            CliError::Generation(_) => "generation",
            CliError::Output(_) | CliError::Json(_) => "output",
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::Logging(_) => 2,
            CliError::Store(err) => match err.kind() {
                ErrorKind::Config => 2,
                ErrorKind::Connection => 3,
                ErrorKind::Constraint => 4,
                ErrorKind::Query => 5,
            },
            CliError::Generation(_) => 6,
            CliError::Output(_) | CliError::Json(_) => 1,
        }
    }
}
