//! Fake-key removal.
//!
//! Clients send flagged padding keys so upload traffic cannot be
//! fingerprinted. Padding must never reach storage; it is dropped silently,
//! as the smaller batch is the expected outcome, not an error.

use crate::error::ValidationError;
use crate::model::key::TemporaryExposureKey;
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyFilter;

pub struct RemoveFakeKeys;

impl KeyFilter for RemoveFakeKeys {
    fn name(&self) -> &'static str {
        "RemoveFakeKeys"
    }

    fn filter(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
        let before = keys.len();
        let kept: Vec<_> = keys.into_iter().filter(|key| !key.fake).collect();

        if kept.len() < before {
            log::debug!(
                "{} FAKE_KEYS_DROPPED count={}",
                ctx.log_context(),
                before - kept.len()
            );
        }

        Ok(kept)
    }
}
