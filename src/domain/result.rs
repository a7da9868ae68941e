//! Result type alias for carelog

use super::errors::CarelogError;

/// Result type alias used for all fallible operations in this crate
pub type Result<T> = std::result::Result<T, CarelogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CarelogError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(7)
        }

        assert_eq!(inner()?, 7);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<()> = Err(CarelogError::InvalidArgument("x".to_string()));
        assert!(result.is_err());
    }
}
