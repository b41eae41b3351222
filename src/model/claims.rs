//! Verified upload claims.
//!
//! The token-verification collaborator resolves the upload token before the
//! pipeline runs and hands over the claims as plain data. This core never
//! parses or verifies tokens.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Already-authenticated claims attached to a submission.
///
/// Which field is populated depends on the upload endpoint variant: the
/// regular endpoint carries `onset_date` (earliest permitted key date), the
/// next-day endpoint carries `delayed_key_date` (the single permitted date).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Principal {
    pub onset_date: Option<NaiveDate>,
    pub delayed_key_date: Option<NaiveDate>,
}

impl Principal {
    /// Claims object with no date restrictions.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn with_onset_date(onset_date: NaiveDate) -> Self {
        Self {
            onset_date: Some(onset_date),
            delayed_key_date: None,
        }
    }

    pub fn with_delayed_key_date(delayed_key_date: NaiveDate) -> Self {
        Self {
            onset_date: None,
            delayed_key_date: Some(delayed_key_date),
        }
    }
}
