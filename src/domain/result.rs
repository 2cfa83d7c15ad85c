//! Result type alias for Confzip
//!
//! This module provides a convenient Result type alias that uses ConfzipError
//! as the error type.

use super::errors::ConfzipError;

/// Result type alias for Confzip operations
///
/// # Examples
///
/// ```
/// use confzip::domain::result::Result;
/// use confzip::domain::errors::ConfzipError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ConfzipError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConfzipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
