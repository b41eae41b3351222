//! Pipeline orchestration module.
//!
//! The engine that runs registered filter and modifier units against one
//! submission, plus the per-request context they consume.

pub mod context;
pub mod engine;

pub use context::*;
pub use engine::*;
