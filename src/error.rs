//! Error types for part identity and matching.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Catalog file not found (-1)
    FileNotFound = -1,
    /// Empty catalog file (-2)
    EmptyFile = -2,
    /// Malformed catalog data (-3)
    ParseError = -3,
    /// Backing store could not be queried (E100)
    CatalogUnavailable = 100,
    /// Name already taken (E200)
    AllocationConflict = 200,
    /// No identifier could be allocated (E201)
    AllocationFailed = 201,
    /// Parent link not backed by a derived sub-part name (E202)
    InvalidParent = 202,
    /// Required dimension missing (E300)
    InvalidDimensions = 300,
    /// Unknown part or part type (E400)
    NotFound = 400,
}

/// Failure reported by a [`PartStore`](crate::store::PartStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("name '{name}' already exists")]
    UniqueViolation { name: String },

    #[error("part {id} not found")]
    NotFound { id: u64 },

    #[error("operation '{operation}' is not supported by this store")]
    Unsupported { operation: String },
}

impl StoreError {
    /// Shorthand for an unavailable backend.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

/// Main error type for the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    #[error("Part name '{name}' is already taken")]
    AllocationConflict { name: String },

    #[error("Could not allocate a name for {target}: {reason}")]
    AllocationFailed { target: String, reason: String },

    #[error("Part '{name}' cannot reference parent {parent_id}: sub-part names are derived from the parent")]
    InvalidParent { name: String, parent_id: u64 },

    #[error("Invalid dimensions for {part_type}: missing {}", .missing.join(", "))]
    InvalidDimensions {
        part_type: String,
        missing: Vec<String>,
    },

    #[error("Part not found: {id}")]
    PartNotFound { id: String },

    #[error("Unknown part type: '{value}'")]
    UnknownPartType { value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    /// Wrap a store failure that happened while reading the catalog.
    pub fn catalog(err: StoreError) -> Self {
        RegistryError::CatalogUnavailable {
            message: err.to_string(),
        }
    }

    /// Wrap a store failure that happened while allocating a name for `target`.
    pub fn allocation(target: impl Into<String>, err: StoreError) -> Self {
        RegistryError::AllocationFailed {
            target: target.into(),
            reason: err.to_string(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::CatalogUnavailable { .. } => ErrorCode::CatalogUnavailable,
            RegistryError::AllocationConflict { .. } => ErrorCode::AllocationConflict,
            RegistryError::AllocationFailed { .. } => ErrorCode::AllocationFailed,
            RegistryError::InvalidParent { .. } => ErrorCode::InvalidParent,
            RegistryError::InvalidDimensions { .. } => ErrorCode::InvalidDimensions,
            RegistryError::PartNotFound { .. } => ErrorCode::NotFound,
            RegistryError::UnknownPartType { .. } => ErrorCode::NotFound,
            RegistryError::FileNotFound { .. } => ErrorCode::FileNotFound,
            RegistryError::EmptyFile { .. } => ErrorCode::EmptyFile,
            RegistryError::Io(_) => ErrorCode::FileNotFound,
            RegistryError::Json(_) => ErrorCode::ParseError,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the user can reasonably try the same operation again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RegistryError::CatalogUnavailable { .. } | RegistryError::AllocationFailed { .. }
        )
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
