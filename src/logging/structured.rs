//! Structured logging utilities.
//!
//! Provides context-aware logging with the submission id (and, where it
//! helps, a short key digest) included in every log message. Raw key
//! material must never reach a log line.

use std::fmt;

/// Logging context for one submission.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub submission_id: String,
    pub key_digest: Option<String>,
}

impl LogContext {
    pub fn new(submission_id: &str) -> Self {
        Self {
            submission_id: submission_id.to_string(),
            key_digest: None,
        }
    }

    pub fn with_key(&self, key_digest: &str) -> Self {
        Self {
            submission_id: self.submission_id.clone(),
            key_digest: Some(key_digest.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key_digest {
            Some(digest) => write!(f, "[submission={}] [key={}]", self.submission_id, digest),
            None => write!(f, "[submission={}]", self.submission_id),
        }
    }
}
