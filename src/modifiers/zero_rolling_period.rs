//! Zero rolling-period repair.
//!
//! Early client builds uploaded keys with a rolling period of 0 where the
//! framework meant "full day". The value is repaired to 144; every other
//! value, valid or not, passes through untouched.

use crate::model::key::{TemporaryExposureKey, MAX_ROLLING_PERIOD};
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyModifier;

pub struct FixZeroRollingPeriod;

impl KeyModifier for FixZeroRollingPeriod {
    fn name(&self) -> &'static str {
        "FixZeroRollingPeriod"
    }

    fn modify(
        &self,
        ctx: &SubmissionContext,
        mut keys: Vec<TemporaryExposureKey>,
    ) -> Vec<TemporaryExposureKey> {
        let mut repaired = 0usize;
        for key in &mut keys {
            if key.rolling_period == 0 {
                key.rolling_period = MAX_ROLLING_PERIOD;
                repaired += 1;
            }
        }

        if repaired > 0 {
            log::debug!(
                "{} ZERO_ROLLING_PERIOD_FIXED count={}",
                ctx.log_context(),
                repaired
            );
        }

        keys
    }
}
