//! submission-core - validation pipeline for diagnosis-key uploads
//!
//! This crate guards the write path of a diagnosis-key upload service for
//! exposure-notification contact tracing. Clients upload batches of rolling
//! proximity keys; before any key reaches storage, the pipeline here runs
//! every integrity, anti-spoofing and policy check, and repairs known client
//! defects. The implementation prioritizes:
//!
//! 1. **Correctness** - precise time-window and encoding rules, no partial
//!    persistence on abort
//! 2. **Logging** - every decision point logged with submission context
//! 3. **Purity** - units are pure functions of their arguments, so
//!    concurrent submissions need no locks
//!
//! ## Architecture
//!
//! - `model` - keys, verified claims, client versions (data only)
//! - `pipeline` - the engine and the per-submission context
//! - `filters` - units that shrink a batch or abort it
//! - `modifiers` - units that rewrite key fields, never cardinality
//! - `config` - startup wiring: fixed filter order, flag-gated modifiers
//! - `error` - the abort taxonomy surfaced to the controller
//! - `logging` - structured logging with submission context
//!
//! The controller builds a batch plus a [`SubmissionContext`], calls
//! [`ValidationPipeline::process`], and hands the surviving keys to the
//! persistence collaborator. An abort reason is the only failure channel;
//! silent shrinkage is the expected outcome of filtering, not an error.

pub mod config;
pub mod error;
pub mod filters;
pub mod logging;
pub mod model;
pub mod modifiers;
pub mod pipeline;

pub use config::{build_pipeline, PipelineConfig};
pub use error::ValidationError;
pub use model::claims::Principal;
pub use model::key::TemporaryExposureKey;
pub use pipeline::context::{OsType, SubmissionContext};
pub use pipeline::engine::{KeyFilter, KeyModifier, ValidationPipeline};
