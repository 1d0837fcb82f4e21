use sqlx::error::ErrorKind as DbErrorKind;

use supplychain_core::Error;

/// Classify a driver error into the workspace error kinds.
pub fn db_error(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            DbErrorKind::ForeignKeyViolation
            | DbErrorKind::NotNullViolation
            | DbErrorKind::CheckViolation
            | DbErrorKind::UniqueViolation => {
                let constraint = db.constraint().unwrap_or("unnamed");
                Error::Constraint(format!("{} ({constraint})", db.message()))
            }
            _ if value_out_of_range(db.code().as_deref()) => {
                Error::Constraint(db.message().to_string())
            }
            _ => Error::Query(db.message().to_string()),
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => Error::Connection(err.to_string()),
        _ => Error::Query(err.to_string()),
    }
}

/// A value that does not fit its column: string too long (22001) or
/// numeric overflow (22003).
fn value_out_of_range(sqlstate: Option<&str>) -> bool {
    matches!(sqlstate, Some("22001" | "22003"))
}

/// Errors raised while opening the session are always connection errors.
pub fn connect_error(err: sqlx::Error) -> Error {
    match db_error(err) {
        Error::Connection(message) | Error::Query(message) | Error::Constraint(message) => {
            Error::Connection(message)
        }
        other => other,
    }
}
