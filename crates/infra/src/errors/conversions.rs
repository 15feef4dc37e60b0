//! Conversions from external infrastructure errors into domain errors.

use rusqlite::Error as SqlError;
use wikiauth_domain::WikiAuthError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WikiAuthError);

impl From<InfraError> for WikiAuthError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WikiAuthError> for InfraError {
    fn from(value: WikiAuthError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoWikiAuthError {
    fn into_wikiauth(self) -> WikiAuthError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → WikiAuthError */
/* -------------------------------------------------------------------------- */

/// `SQLITE_CONSTRAINT_PRIMARYKEY`
const CONSTRAINT_PRIMARY_KEY: std::os::raw::c_int = 1555;
/// `SQLITE_CONSTRAINT_UNIQUE`
const CONSTRAINT_UNIQUE: std::os::raw::c_int = 2067;

impl IntoWikiAuthError for SqlError {
    fn into_wikiauth(self) -> WikiAuthError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        WikiAuthError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        WikiAuthError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, CONSTRAINT_UNIQUE | CONSTRAINT_PRIMARY_KEY) => {
                        WikiAuthError::AccountConflict(format!(
                            "linked account already exists: {message}"
                        ))
                    }
                    _ => WikiAuthError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => WikiAuthError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                WikiAuthError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::IntegralValueOutOfRange(column, value) => {
                WikiAuthError::Database(format!("value {value} out of range in column {column}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                WikiAuthError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => WikiAuthError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => WikiAuthError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        Self(value.into_wikiauth())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → WikiAuthError */
/* -------------------------------------------------------------------------- */

impl IntoWikiAuthError for r2d2::Error {
    fn into_wikiauth(self) -> WikiAuthError {
        WikiAuthError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        Self(value.into_wikiauth())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
