//! Result type aliases for Behemoth.

use crate::BehemothError;

/// A specialized `Result` type for Behemoth operations.
pub type BehemothResult<T> = Result<T, BehemothError>;
