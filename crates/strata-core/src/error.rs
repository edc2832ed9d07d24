//! Unified error handling for Strata Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Strata Core operations.
///
/// This enum wraps all possible errors that can occur when using strata-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum StrataError {
    /// Errors from the domain layer (invalid input or specification).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl StrataError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Specification => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Check if this error is retryable.
    ///
    /// Materialization is idempotent, so a filesystem failure can be retried
    /// once its cause is fixed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreLockError)
                | Self::Application(ApplicationError::FilesystemError { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Filesystem,
    Internal,
}

/// Convenient result type alias.
pub type StrataResult<T> = Result<T, StrataError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn specification_errors_are_internal() {
        let err: StrataError = DomainError::InvalidRootLayers {
            found: "domain".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.is_retryable());
    }

    #[test]
    fn invalid_names_are_validation_errors() {
        let err: StrataError = DomainError::InvalidProjectName {
            name: "a/b".into(),
            reason: "contains a path separator".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
    }

    #[test]
    fn filesystem_errors_name_the_path() {
        let err: StrataError = ApplicationError::FilesystemError {
            path: PathBuf::from("/out/shop/domain"),
            reason: "Failed to create directory: File exists".into(),
        }
        .into();

        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("/out/shop/domain"));
        assert!(err.suggestions()[0].contains("/out/shop/domain"));
    }
}
