//! Rolling period range enforcement.
//!
//! A key must cover between 1 and 144 ten-minute intervals. Out-of-range
//! values (negative or beyond one day) drop only the offending key, matching
//! the other `Enforce*` units rather than poisoning the batch.
//!
//! Zero is a special case: early clients uploaded 0 where the framework
//! meant "full day". When the FixZeroRollingPeriod modifier is wired in
//! downstream, this filter is built with `allow_zero` so those keys survive
//! long enough to be repaired; otherwise zero is out of range like any other
//! invalid value.

use crate::error::ValidationError;
use crate::model::key::{TemporaryExposureKey, MAX_ROLLING_PERIOD, MIN_ROLLING_PERIOD};
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyFilter;

pub struct EnforceValidRollingPeriod {
    allow_zero: bool,
}

impl EnforceValidRollingPeriod {
    pub fn new(allow_zero: bool) -> Self {
        Self { allow_zero }
    }

    fn is_valid(&self, rolling_period: i32) -> bool {
        (rolling_period == 0 && self.allow_zero)
            || (MIN_ROLLING_PERIOD..=MAX_ROLLING_PERIOD).contains(&rolling_period)
    }
}

impl Default for EnforceValidRollingPeriod {
    fn default() -> Self {
        Self::new(false)
    }
}

impl KeyFilter for EnforceValidRollingPeriod {
    fn name(&self) -> &'static str {
        "EnforceValidRollingPeriod"
    }

    fn filter(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
        let log_ctx = ctx.log_context();

        let kept: Vec<_> = keys
            .into_iter()
            .filter(|key| {
                let valid = self.is_valid(key.rolling_period);
                if !valid {
                    log::info!(
                        "{} ROLLING_PERIOD_INVALID value={}",
                        log_ctx.with_key(&key.digest()),
                        key.rolling_period
                    );
                }
                valid
            })
            .collect();

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose, Engine as _};
    use chrono::Utc;

    use super::*;
    use crate::model::claims::Principal;
    use crate::model::key::KEY_DATA_LENGTH;
    use crate::pipeline::context::OsType;

    fn ctx() -> SubmissionContext {
        SubmissionContext::new(
            Utc::now(),
            OsType::Android,
            None,
            None,
            Principal::unrestricted(),
        )
    }

    fn key_with_period(rolling_period: i32) -> TemporaryExposureKey {
        TemporaryExposureKey {
            key_data: general_purpose::STANDARD.encode([4u8; KEY_DATA_LENGTH]),
            rolling_start_interval_number: 2_975_000,
            rolling_period,
            transmission_risk_level: 8,
            fake: false,
        }
    }

    #[test]
    fn test_range_boundaries() {
        let batch = vec![
            key_with_period(0),
            key_with_period(1),
            key_with_period(144),
            key_with_period(145),
            key_with_period(-10),
        ];
        let out = EnforceValidRollingPeriod::default()
            .filter(&ctx(), batch)
            .unwrap();
        let periods: Vec<_> = out.iter().map(|k| k.rolling_period).collect();
        assert_eq!(periods, vec![1, 144]);
    }

    #[test]
    fn test_allow_zero_keeps_zero_but_not_negatives() {
        let batch = vec![key_with_period(0), key_with_period(-1), key_with_period(145)];
        let out = EnforceValidRollingPeriod::new(true)
            .filter(&ctx(), batch)
            .unwrap();
        let periods: Vec<_> = out.iter().map(|k| k.rolling_period).collect();
        assert_eq!(periods, vec![0]);
    }

    #[test]
    fn test_drop_not_abort() {
        // Even a batch of nothing but invalid periods shrinks to empty
        // instead of aborting.
        let out = EnforceValidRollingPeriod::default()
            .filter(&ctx(), vec![key_with_period(0), key_with_period(9999)])
            .unwrap();
        assert!(out.is_empty());
    }
}
