//! Abort taxonomy for the validation pipeline.
//!
//! An abort is the only failure channel out of the pipeline. Filters that
//! merely drop keys are not errors; they are observable only as a smaller
//! output batch.

use thiserror::Error;

/// Fatal validation failure that aborts an entire submission.
///
/// Only `Assert*` filter units raise these. The controller maps the reason
/// code to a transport-level status; no partial persistence ever happens for
/// an aborted submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Some key's `key_data` is not valid base64 for exactly 16 bytes.
    #[error("invalid key encoding: {detail}")]
    InvalidEncoding { detail: String },
}

impl ValidationError {
    /// Stable token for the controller's status mapping.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEncoding { .. } => "invalid_encoding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_code() {
        let err = ValidationError::InvalidEncoding {
            detail: "key 0deadbeef012 decodes to 12 bytes".to_string(),
        };
        assert_eq!(err.reason_code(), "invalid_encoding");
        assert!(err.to_string().contains("invalid key encoding"));
    }
}
