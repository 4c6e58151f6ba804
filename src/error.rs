use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("ORM error: {0}")]
    OrmError(#[from] DbErr),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// True when the store rejected the write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::OrmError(err) => is_unique_violation(err),
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Name of the violated constraint, when the driver reports one.
///
/// Postgres names the index or constraint; SQLite only names the columns, so
/// callers fall back to [`violation_message`] there.
pub fn constraint_name(err: &DbErr) -> Option<String> {
    let sqlx_err: &sqlx::Error = match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e,
        _ => return None,
    };
    sqlx_err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .map(str::to_owned)
}

pub fn violation_message(err: &DbErr) -> Option<String> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg) => {
            Some(msg)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_errors_are_not_unique_violations() {
        assert!(!AppError::NotFound.is_unique_violation());
        assert!(!AppError::validation("bad").is_unique_violation());
        let err = AppError::from(DbErr::RecordNotFound("x".into()));
        assert!(!err.is_unique_violation());
        assert_eq!(constraint_name(&DbErr::Custom("x".into())), None);
    }

    #[test]
    fn validation_message_is_displayed() {
        let err = AppError::validation("currency must be a 3-letter code");
        assert_eq!(
            err.to_string(),
            "Validation error: currency must be a 3-letter code"
        );
    }
}
