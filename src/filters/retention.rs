//! Retention window enforcement.
//!
//! Storage only keeps keys for a configured number of days; accepting keys
//! older than that window would store data the cleanup job deletes on its
//! next run. The window ends at the submission's `received_at` date and its
//! lower boundary is inclusive.

use chrono::Days;

use crate::error::ValidationError;
use crate::model::key::TemporaryExposureKey;
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyFilter;

/// Default retention window in days.
pub const DEFAULT_RETENTION_DAYS: u64 = 14;

pub struct EnforceRetentionPeriod {
    retention_days: u64,
}

impl EnforceRetentionPeriod {
    pub fn new(retention_days: u64) -> Self {
        Self { retention_days }
    }
}

impl Default for EnforceRetentionPeriod {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS)
    }
}

impl KeyFilter for EnforceRetentionPeriod {
    fn name(&self) -> &'static str {
        "EnforceRetentionPeriod"
    }

    fn filter(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
        let log_ctx = ctx.log_context();
        let earliest = ctx
            .received_at
            .date_naive()
            .checked_sub_days(Days::new(self.retention_days));

        let Some(earliest) = earliest else {
            // Window start underflows the calendar; every representable
            // key date is inside the window.
            return Ok(keys);
        };

        let kept: Vec<_> = keys
            .into_iter()
            .filter(|key| {
                let in_window = key.derived_date().is_some_and(|date| date >= earliest);
                if !in_window {
                    log::info!(
                        "{} RETENTION_EXPIRED date={:?} earliest={}",
                        log_ctx.with_key(&key.digest()),
                        key.derived_date(),
                        earliest
                    );
                }
                in_window
            })
            .collect();

        Ok(kept)
    }
}
