use thiserror::Error;

/// Errors emitted while generating or persisting synthetic rows.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid seed options: {0}")]
    InvalidOptions(String),
    #[error("no parent rows for {0}")]
    NoParents(&'static str),
    #[error(transparent)]
    Store(#[from] supplychain_core::Error),
}
