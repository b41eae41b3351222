//! Future-dated key removal.
//!
//! A key whose derived date lies past the allowed clock-skew horizon cannot
//! be genuine yet. The horizon defaults to "day after tomorrow" relative to
//! the submission's single `received_at` reference; a key exactly at the
//! horizon is kept.

use chrono::Days;

use crate::error::ValidationError;
use crate::model::key::TemporaryExposureKey;
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyFilter;

/// Default skew tolerance in calendar days.
pub const DEFAULT_MAX_FUTURE_DAYS: u64 = 2;

pub struct RemoveFutureKeys {
    max_future_days: u64,
}

impl RemoveFutureKeys {
    pub fn new(max_future_days: u64) -> Self {
        Self { max_future_days }
    }
}

impl Default for RemoveFutureKeys {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FUTURE_DAYS)
    }
}

impl KeyFilter for RemoveFutureKeys {
    fn name(&self) -> &'static str {
        "RemoveFutureKeys"
    }

    fn filter(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
        let log_ctx = ctx.log_context();
        let horizon = ctx
            .received_at
            .date_naive()
            .checked_add_days(Days::new(self.max_future_days));

        let Some(horizon) = horizon else {
            // received_at near the end of representable time; nothing can
            // legitimately be beyond it.
            return Ok(keys);
        };

        let kept: Vec<_> = keys
            .into_iter()
            .filter(|key| {
                let in_range = key.derived_date().is_some_and(|date| date <= horizon);
                if !in_range {
                    log::info!(
                        "{} FUTURE_KEY_DROPPED date={:?} horizon={}",
                        log_ctx.with_key(&key.digest()),
                        key.derived_date(),
                        horizon
                    );
                }
                in_range
            })
            .collect();

        Ok(kept)
    }
}
