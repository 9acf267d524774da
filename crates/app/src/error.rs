use fibertrack_core::error::CoreError;
use fibertrack_db::{BlobError, DbError};

/// Application-level error type for command functions.
///
/// Wraps [`CoreError`] for domain errors and [`BlobError`] for storage
/// failures of the user directory.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] BlobError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            DbError::Blob(blob) => AppError::Storage(blob),
        }
    }
}

impl AppError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => "NOT_FOUND",
                CoreError::Validation(_) => "VALIDATION_ERROR",
                CoreError::Conflict(_) => "CONFLICT",
                CoreError::Unauthorized(_) => "UNAUTHORIZED",
                CoreError::Forbidden(_) => "FORBIDDEN",
                CoreError::UnknownUser(_) => "UNKNOWN_USER",
                CoreError::WrongPassword => "WRONG_PASSWORD",
                CoreError::Internal(_) => "INTERNAL_ERROR",
            },
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the person at the keyboard.
    ///
    /// Internal and storage failures are logged and replaced by a generic text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(CoreError::Internal(msg)) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                "Saved data could not be read or written".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_flatten_into_app_variants() {
        let err: AppError = DbError::Core(CoreError::Conflict("dup".into())).into();
        assert_eq!(err.code(), "CONFLICT");

        let err: AppError = DbError::Blob(BlobError::InvalidKey("../x".into())).into();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn login_failures_have_distinct_codes() {
        assert_eq!(AppError::from(CoreError::WrongPassword).code(), "WRONG_PASSWORD");
        assert_eq!(
            AppError::from(CoreError::UnknownUser("ghost".into())).code(),
            "UNKNOWN_USER"
        );
    }

    #[test]
    fn internal_details_are_hidden_from_users() {
        let err = AppError::Internal("hash parameters corrupt".into());
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::from(CoreError::Validation("name is required".into()));
        assert!(err.user_message().contains("name is required"));
    }
}
