//! Result type alias for esindex

use super::errors::EsIndexError;

/// Result type alias for esindex operations
///
/// # Examples
///
/// ```
/// use esindex::domain::result::Result;
/// use esindex::domain::errors::EsIndexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EsIndexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EsIndexError>;

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

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(EsIndexError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
