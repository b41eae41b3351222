//! Data model for diagnosis-key submissions.
//!
//! Plain data in, plain data out: the types here carry no validation logic,
//! that lives in the `filters` and `modifiers` units.

pub mod claims;
pub mod key;
pub mod version;

pub use claims::*;
pub use key::*;
pub use version::*;
