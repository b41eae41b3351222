//! Claim cross-check filter.
//!
//! Health-authority claims bound which key dates an upload may contain. The
//! regular endpoint issues an `onset_date` (no key may predate it); the
//! next-day endpoint issues a `delayed_key_date` (exactly that date is
//! permitted). With neither claim present the batch passes through.

use crate::error::ValidationError;
use crate::model::key::TemporaryExposureKey;
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyFilter;

pub struct EnforceMatchingClaims;

impl EnforceMatchingClaims {
    /// A key matches when its derived date satisfies the active claim.
    /// `delayed_key_date` takes precedence when both are present. A key
    /// whose date cannot be derived never matches a claim.
    fn matches(&self, ctx: &SubmissionContext, key: &TemporaryExposureKey) -> bool {
        let principal = &ctx.principal;

        if principal.delayed_key_date.is_none() && principal.onset_date.is_none() {
            return true;
        }

        let Some(date) = key.derived_date() else {
            return false;
        };

        if let Some(delayed) = principal.delayed_key_date {
            return date == delayed;
        }

        // onset_date is Some here.
        principal.onset_date.map_or(true, |onset| date >= onset)
    }
}

impl KeyFilter for EnforceMatchingClaims {
    fn name(&self) -> &'static str {
        "EnforceMatchingClaims"
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
                let matched = self.matches(ctx, key);
                if !matched {
                    log::info!(
                        "{} CLAIMS_MISMATCH date={:?} onset={:?} delayed={:?}",
                        log_ctx.with_key(&key.digest()),
                        key.derived_date(),
                        ctx.principal.onset_date,
                        ctx.principal.delayed_key_date
                    );
                }
                matched
            })
            .collect();

        Ok(kept)
    }
}
