//! Per-submission context.
//!
//! One context is built per upload request and stays immutable while the
//! pipeline runs. `received_at` is the single time reference for every
//! time-based rule in the batch; it is captured once and never re-read.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;
use crate::model::claims::Principal;
use crate::model::version::ClientVersion;

/// Client platform, as reported by the upload headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsType {
    Ios,
    Android,
    Unknown,
}

impl OsType {
    /// Lenient parse of the platform header; anything unrecognized is
    /// `Unknown`, never a rejection.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ios" => OsType::Ios,
            "android" => OsType::Android,
            _ => OsType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsType::Ios => "ios",
            OsType::Android => "android",
            OsType::Unknown => "unknown",
        }
    }
}

/// Immutable context for one upload request.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub submission_id: String,
    pub received_at: DateTime<Utc>,
    pub os_type: OsType,
    pub os_version: Option<ClientVersion>,
    pub app_version: Option<ClientVersion>,
    pub principal: Principal,
}

impl SubmissionContext {
    pub fn new(
        received_at: DateTime<Utc>,
        os_type: OsType,
        os_version: Option<&str>,
        app_version: Option<&str>,
        principal: Principal,
    ) -> Self {
        let submission_id = format!("sub-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            submission_id,
            received_at,
            os_type,
            os_version: os_version.and_then(ClientVersion::parse),
            app_version: app_version.and_then(ClientVersion::parse),
            principal,
        }
    }

    /// Logging context for this submission.
    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.submission_id)
    }
}
