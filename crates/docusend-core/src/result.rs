//! Convenience result type alias for DocuSend.

use crate::error::AppError;

/// A specialized `Result` type for DocuSend operations.
pub type AppResult<T> = Result<T, AppError>;
