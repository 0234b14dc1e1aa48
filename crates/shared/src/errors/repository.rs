use sqlx::Error as SqlxError;
use thiserror::Error;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        if let Some(db_err) = err.as_database_error() {
            let message = db_err.message().to_string();
            match db_err.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => return RepositoryError::ForeignKey(message),
                Some(UNIQUE_VIOLATION) => return RepositoryError::Conflict(message),
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}
