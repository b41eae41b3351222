//! Modifier units.
//!
//! Modifiers rewrite key fields after all filters have passed; they never
//! change batch size or order, and re-applying one to already-normalized
//! data is a no-op.

pub mod ios_rolling_period;
pub mod zero_rolling_period;

pub use ios_rolling_period::NormalizeRollingPeriodForLegacyIos;
pub use zero_rolling_period::FixZeroRollingPeriod;
