//! Error types for Stacklens operations.
//!
//! This module provides the main error type [`StacklensError`]. Parsing a
//! thrown value never fails because of the value's shape; only the
//! caller-supplied extension points can make it fail.

use thiserror::Error;

use crate::BoxError;

/// The main error type for Stacklens operations.
#[derive(Debug, Error)]
pub enum StacklensError {
    #[error("pre-processor #{index} failed: {source}")]
    PreProcessor { index: usize, source: BoxError },

    #[error("post-processor #{index} failed: {source}")]
    PostProcessor { index: usize, source: BoxError },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_and_source() {
        let err = StacklensError::PostProcessor {
            index: 2,
            source: "renderer unavailable".into(),
        };
        assert_eq!(err.to_string(), "post-processor #2 failed: renderer unavailable");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_pre_processor_index() {
        let err = StacklensError::PreProcessor {
            index: 0,
            source: "unsupported payload".into(),
        };
        assert!(matches!(err, StacklensError::PreProcessor { index: 0, .. }));
        assert_eq!(err.to_string(), "pre-processor #0 failed: unsupported payload");
    }
}
