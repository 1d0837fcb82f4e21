use thiserror::Error;

/// Error type shared across the supply-chain crates.
///
/// Storage failures are classified once, at the store boundary, so callers
/// can react to the kind without inspecting driver errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be reached or the session was lost.
    #[error("connection error: {0}")]
    Connection(String),
    /// A foreign key, not-null, check, or unique constraint rejected a row.
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// Any other statement failure.
    #[error("query error: {0}")]
    Query(String),
    /// Invalid configuration handed to a store.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Discriminant of [`Error`], used for exit codes and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Constraint,
    Query,
    Config,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Constraint => "constraint",
            Self::Query => "query",
            Self::Config => "config",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Constraint(_) => ErrorKind::Constraint,
            Self::Query(_) => ErrorKind::Query,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Convenience alias for results returned by the supply-chain crates.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            Error::Constraint("fk".to_string()).kind(),
            ErrorKind::Constraint
        );
        assert_eq!(Error::Query("boom".to_string()).kind().as_str(), "query");
    }

    #[test]
    fn display_includes_kind_prefix() {
        let err = Error::Connection("refused".to_string());
        assert_eq!(err.to_string(), "connection error: refused");
    }
}
