//! Rolling period normalization for legacy iOS clients.
//!
//! The legacy iOS exposure framework can only match full-day keys. Uploads
//! from iOS devices get every key's rolling period forced to 144 so their
//! keys stay matchable across platforms; every other platform is left
//! untouched.

use crate::model::key::{TemporaryExposureKey, MAX_ROLLING_PERIOD};
use crate::pipeline::context::{OsType, SubmissionContext};
use crate::pipeline::engine::KeyModifier;

pub struct NormalizeRollingPeriodForLegacyIos;

impl KeyModifier for NormalizeRollingPeriodForLegacyIos {
    fn name(&self) -> &'static str {
        "NormalizeRollingPeriodForLegacyIos"
    }

    fn modify(
        &self,
        ctx: &SubmissionContext,
        mut keys: Vec<TemporaryExposureKey>,
    ) -> Vec<TemporaryExposureKey> {
        if ctx.os_type != OsType::Ios {
            return keys;
        }

        let mut normalized = 0usize;
        for key in &mut keys {
            if key.rolling_period != MAX_ROLLING_PERIOD {
                key.rolling_period = MAX_ROLLING_PERIOD;
                normalized += 1;
            }
        }

        if normalized > 0 {
            log::debug!(
                "{} IOS_ROLLING_PERIOD_NORMALIZED count={}",
                ctx.log_context(),
                normalized
            );
        }

        keys
    }
}
