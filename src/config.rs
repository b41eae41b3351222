//! Startup configuration for the validation pipeline.
//!
//! The embedding service resolves this once at startup (from its own config
//! source, handed over as plain data) and builds the pipeline before taking
//! traffic. Registration after traffic begins is a configuration error, not
//! a request-time concern; the built pipeline is read-only from then on.

use serde::{Deserialize, Serialize};

use crate::filters::{
    AssertValidEncoding, EnforceMatchingClaims, EnforceRetentionPeriod, EnforceValidRollingPeriod,
    RemoveFakeKeys, RemoveFutureKeys,
};
use crate::filters::future::DEFAULT_MAX_FUTURE_DAYS;
use crate::filters::retention::DEFAULT_RETENTION_DAYS;
use crate::modifiers::{FixZeroRollingPeriod, NormalizeRollingPeriodForLegacyIos};
use crate::pipeline::engine::ValidationPipeline;

/// Pipeline knobs, all defaulted so an empty config document is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Retention window length in days; keys dated earlier than
    /// `received_at - retention_days` are dropped.
    pub retention_days: u64,
    /// Clock-skew tolerance in days for future-dated keys.
    pub max_future_days: u64,
    /// Force full-day rolling periods on iOS uploads.
    pub normalize_ios_rolling_period: bool,
    /// Repair the zero-rolling-period defect of early clients. Also makes
    /// the range filter tolerate 0 so the repair can reach those keys.
    pub fix_zero_rolling_period: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            max_future_days: DEFAULT_MAX_FUTURE_DAYS,
            normalize_ios_rolling_period: true,
            fix_zero_rolling_period: true,
        }
    }
}

impl PipelineConfig {
    /// Parse a config document handed over by the embedding service.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Build the frozen default pipeline for a configuration.
///
/// Filter order is fixed: encoding assertion first (nothing else should run
/// on a batch that cannot be trusted at all), then the claim, time-window,
/// fake-traffic and rolling-period rules. Optional modifiers are appended
/// according to the config flags.
pub fn build_pipeline(config: &PipelineConfig) -> ValidationPipeline {
    let mut pipeline = ValidationPipeline::new();

    pipeline.register_filter(Box::new(AssertValidEncoding));
    pipeline.register_filter(Box::new(EnforceMatchingClaims));
    pipeline.register_filter(Box::new(RemoveFutureKeys::new(config.max_future_days)));
    pipeline.register_filter(Box::new(EnforceRetentionPeriod::new(config.retention_days)));
    pipeline.register_filter(Box::new(RemoveFakeKeys));
    pipeline.register_filter(Box::new(EnforceValidRollingPeriod::new(
        config.fix_zero_rolling_period,
    )));

    if config.normalize_ios_rolling_period {
        pipeline.register_modifier(Box::new(NormalizeRollingPeriodForLegacyIos));
    }
    if config.fix_zero_rolling_period {
        pipeline.register_modifier(Box::new(FixZeroRollingPeriod));
    }

    log::info!(
        "PIPELINE_BUILT filters={} modifiers={} retention_days={} max_future_days={}",
        pipeline.filter_count(),
        pipeline.modifier_count(),
        config.retention_days,
        config.max_future_days
    );

    pipeline
}
