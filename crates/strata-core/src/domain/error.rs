// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Input validation
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid marker file name '{name}': {reason}")]
    InvalidMarkerFile { name: String, reason: String },

    #[error("Invalid path segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Specification integrity (built-in table is malformed)
    // ========================================================================
    #[error("Layout entry '{path}' in section '{section}' is not referenced as a child of its parent")]
    MissingChildReference { section: String, path: String },

    #[error("Layout entry '{parent}' in section '{section}' lists child '{child}' twice")]
    DuplicateChild {
        section: String,
        parent: String,
        child: String,
    },

    #[error("Duplicate key in specification: {path}")]
    DuplicatePath { path: String },

    #[error("Section '{section}' has no root layout entry")]
    MissingRoot { section: String },

    #[error("Project root must expand to application, domain, infrastructure, interfaces; found: {found}")]
    InvalidRootLayers { found: String },

    #[error("Description key '{key}' does not name a package of the project")]
    UnboundDescription { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Pass a single directory name, not a path".into(),
                "Use --output to choose where the project is created".into(),
            ],
            Self::InvalidMarkerFile { name, .. } => vec![
                format!("'{}' cannot be used as a marker file name", name),
                "Use a plain file name such as __init__.py, README.md or .package".into(),
            ],
            Self::InvalidSegment { .. } | Self::AbsolutePathNotAllowed { .. } => {
                vec!["Paths must be relative and made of plain names".into()]
            }
            _ => vec![
                "The built-in scaffold specification is inconsistent".into(),
                "This is a bug, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidMarkerFile { .. }
            | Self::InvalidSegment { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Specification,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Specification,
}
