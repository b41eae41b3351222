//! Filter units.
//!
//! Each filter inspects the batch and either passes it through, shrinks it,
//! or aborts the whole submission. `Assert*` units abort on any violation;
//! `Remove*`/`Enforce*` units silently drop disqualifying keys.

pub mod claims;
pub mod encoding;
pub mod fake;
pub mod future;
pub mod retention;
pub mod rolling_period;

pub use claims::EnforceMatchingClaims;
pub use encoding::AssertValidEncoding;
pub use fake::RemoveFakeKeys;
pub use future::RemoveFutureKeys;
pub use retention::EnforceRetentionPeriod;
pub use rolling_period::EnforceValidRollingPeriod;
