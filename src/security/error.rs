use thiserror::Error;

// ---------------------------------------------------------------------------
// Validation outcome
// ---------------------------------------------------------------------------

/// Why a validation or acquisition step refused its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SecurityError {
    #[error("invalid input parameters")]
    InvalidInput,
    #[error("file path too long")]
    PathTooLong,
    #[error("file size exceeds limit")]
    FileTooLarge,
    #[error("access denied or file not found")]
    AccessDenied,
    #[error("memory allocation failed")]
    AllocationFailure,
}

/// Outcome of every validation, allocation and acquisition step.
pub type ValidationResult<T = ()> = Result<T, SecurityError>;
