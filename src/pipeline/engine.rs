//! Validation pipeline engine.
//!
//! Holds an ordered list of filter units and an ordered list of modifier
//! units and runs them against one submission at a time:
//! 1. Filters, in registration order. A filter may shrink the batch or abort
//!    the whole submission; an abort short-circuits, no later filter or
//!    modifier runs.
//! 2. Modifiers, in registration order, over the surviving keys. Modifiers
//!    rewrite fields but never change batch size or order.
//!
//! Registration happens once, on a single thread, before the service takes
//! traffic; afterwards the pipeline is read-only, which is what makes
//! concurrent `process` calls safe without locks.

use crate::error::ValidationError;
use crate::model::key::TemporaryExposureKey;
use crate::pipeline::context::SubmissionContext;

/// A validation unit that may drop keys from the batch or abort it.
///
/// Naming is part of the contract: `Assert*` filters are all-or-nothing and
/// abort on any violation; `Remove*`/`Enforce*` filters silently drop
/// disqualifying keys and never abort. Implementations must be pure
/// functions of their arguments: no retained state, no I/O.
pub trait KeyFilter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns a subsequence of `keys` (same relative order), or aborts.
    fn filter(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError>;
}

/// A normalization unit that rewrites key fields in place.
///
/// Must return a batch of identical size and order. Implementations must be
/// pure and idempotent.
pub trait KeyModifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn modify(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Vec<TemporaryExposureKey>;
}

/// Ordered, startup-frozen sequence of filters and modifiers.
#[derive(Default)]
pub struct ValidationPipeline {
    filters: Vec<Box<dyn KeyFilter>>,
    modifiers: Vec<Box<dyn KeyModifier>>,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. Startup-time only, single initializing thread.
    pub fn register_filter(&mut self, filter: Box<dyn KeyFilter>) {
        log::info!("PIPELINE_REGISTER kind=filter name={}", filter.name());
        self.filters.push(filter);
    }

    /// Append a modifier. Startup-time only, single initializing thread.
    pub fn register_modifier(&mut self, modifier: Box<dyn KeyModifier>) {
        log::info!("PIPELINE_REGISTER kind=modifier name={}", modifier.name());
        self.modifiers.push(modifier);
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// Run one submission through the pipeline.
    ///
    /// All filters complete before any modifier runs ("validate before
    /// normalize"). Returns the final batch, or the abort raised by the
    /// first failing filter.
    pub fn process(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
        let log_ctx = ctx.log_context();
        let received = keys.len();

        log::debug!(
            "{} SUBMISSION_START keys={} os={}",
            log_ctx,
            received,
            ctx.os_type.as_str()
        );

        let mut batch = keys;

        for filter in &self.filters {
            let before = batch.len();
            batch = match filter.filter(ctx, batch) {
                Ok(kept) => kept,
                Err(err) => {
                    log::warn!(
                        "{} SUBMISSION_ABORTED filter={} reason={} detail={}",
                        log_ctx,
                        filter.name(),
                        err.reason_code(),
                        err
                    );
                    return Err(err);
                }
            };

            if batch.len() < before {
                log::info!(
                    "{} FILTER_APPLIED name={} before={} after={}",
                    log_ctx,
                    filter.name(),
                    before,
                    batch.len()
                );
            } else {
                log::debug!(
                    "{} FILTER_APPLIED name={} before={} after={}",
                    log_ctx,
                    filter.name(),
                    before,
                    batch.len()
                );
            }
        }

        for modifier in &self.modifiers {
            let before = batch.len();
            batch = modifier.modify(ctx, batch);
            debug_assert_eq!(
                batch.len(),
                before,
                "modifier {} changed batch cardinality",
                modifier.name()
            );
            log::debug!(
                "{} MODIFIER_APPLIED name={} keys={}",
                log_ctx,
                modifier.name(),
                batch.len()
            );
        }

        log::info!(
            "{} SUBMISSION_COMPLETE received={} accepted={}",
            log_ctx,
            received,
            batch.len()
        );

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::claims::Principal;
    use crate::pipeline::context::OsType;

    fn test_context() -> SubmissionContext {
        SubmissionContext::new(
            Utc::now(),
            OsType::Android,
            None,
            None,
            Principal::unrestricted(),
        )
    }

    fn test_key(risk: i32) -> TemporaryExposureKey {
        TemporaryExposureKey {
            key_data: "x".repeat(24),
            rolling_start_interval_number: 0,
            rolling_period: 144,
            transmission_risk_level: risk,
            fake: false,
        }
    }

    /// Drops every key whose risk level is below a threshold.
    struct DropBelowRisk(i32);

    impl KeyFilter for DropBelowRisk {
        fn name(&self) -> &'static str {
            "DropBelowRisk"
        }

        fn filter(
            &self,
            _ctx: &SubmissionContext,
            keys: Vec<TemporaryExposureKey>,
        ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
            Ok(keys
                .into_iter()
                .filter(|k| k.transmission_risk_level >= self.0)
                .collect())
        }
    }

    /// Aborts unconditionally.
    struct AlwaysAbort;

    impl KeyFilter for AlwaysAbort {
        fn name(&self) -> &'static str {
            "AlwaysAbort"
        }

        fn filter(
            &self,
            _ctx: &SubmissionContext,
            _keys: Vec<TemporaryExposureKey>,
        ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
            Err(ValidationError::InvalidEncoding {
                detail: "always".to_string(),
            })
        }
    }

    /// Panics if ever invoked; proves the abort short-circuit.
    struct MustNotRun;

    impl KeyFilter for MustNotRun {
        fn name(&self) -> &'static str {
            "MustNotRun"
        }

        fn filter(
            &self,
            _ctx: &SubmissionContext,
            _keys: Vec<TemporaryExposureKey>,
        ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
            panic!("filter ran after an abort");
        }
    }

    impl KeyModifier for MustNotRun {
        fn name(&self) -> &'static str {
            "MustNotRun"
        }

        fn modify(
            &self,
            _ctx: &SubmissionContext,
            _keys: Vec<TemporaryExposureKey>,
        ) -> Vec<TemporaryExposureKey> {
            panic!("modifier ran after an abort");
        }
    }

    /// Sets every key's risk level to a fixed value.
    struct SetRisk(i32);

    impl KeyModifier for SetRisk {
        fn name(&self) -> &'static str {
            "SetRisk"
        }

        fn modify(
            &self,
            _ctx: &SubmissionContext,
            mut keys: Vec<TemporaryExposureKey>,
        ) -> Vec<TemporaryExposureKey> {
            for key in &mut keys {
                key.transmission_risk_level = self.0;
            }
            keys
        }
    }

    #[test]
    fn test_empty_pipeline_passes_batch_through() {
        let pipeline = ValidationPipeline::new();
        let batch = vec![test_key(1), test_key(2)];
        let out = pipeline.process(&test_context(), batch.clone()).unwrap();
        assert_eq!(out, batch);
    }

    #[test]
    fn test_filters_chain_and_only_shrink() {
        let mut pipeline = ValidationPipeline::new();
        pipeline.register_filter(Box::new(DropBelowRisk(2)));
        pipeline.register_filter(Box::new(DropBelowRisk(5)));

        let out = pipeline
            .process(&test_context(), vec![test_key(1), test_key(3), test_key(7)])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].transmission_risk_level, 7);
    }

    #[test]
    fn test_abort_short_circuits_everything_after_it() {
        let mut pipeline = ValidationPipeline::new();
        pipeline.register_filter(Box::new(AlwaysAbort));
        pipeline.register_filter(Box::new(MustNotRun));
        pipeline.register_modifier(Box::new(MustNotRun));

        let err = pipeline
            .process(&test_context(), vec![test_key(1)])
            .unwrap_err();
        assert_eq!(err.reason_code(), "invalid_encoding");
    }

    #[test]
    fn test_modifiers_run_after_all_filters() {
        let mut pipeline = ValidationPipeline::new();
        // The filter would drop risk-9 keys if it ran after the modifier.
        pipeline.register_filter(Box::new(DropBelowRisk(5)));
        pipeline.register_modifier(Box::new(SetRisk(9)));

        let out = pipeline
            .process(&test_context(), vec![test_key(1), test_key(6)])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].transmission_risk_level, 9);
    }

    #[test]
    fn test_surviving_order_is_preserved() {
        let mut pipeline = ValidationPipeline::new();
        pipeline.register_filter(Box::new(DropBelowRisk(0)));

        let batch = vec![test_key(3), test_key(1), test_key(2)];
        let out = pipeline.process(&test_context(), batch.clone()).unwrap();
        assert_eq!(out, batch);
    }
}
