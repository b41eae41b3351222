//! Temporary exposure key model.
//!
//! A key is the unit being validated. Fields arrive exactly as the controller
//! deserialized them from the upload payload; nothing here is trusted until
//! the pipeline has run.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Decoded length of valid key material, in bytes.
pub const KEY_DATA_LENGTH: usize = 16;

/// Length of one rolling interval, in seconds (10 minutes).
pub const INTERVAL_SECS: i64 = 600;

/// Number of 10-minute intervals in one day; also the normalized
/// rolling period for full-day keys.
pub const MAX_ROLLING_PERIOD: i32 = 144;

/// Lower bound of the valid rolling period range.
pub const MIN_ROLLING_PERIOD: i32 = 1;

/// A rolling proximity key as uploaded by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryExposureKey {
    /// Base64-encoded key material. Must decode to exactly
    /// [`KEY_DATA_LENGTH`] bytes.
    pub key_data: String,
    /// 10-minute interval index since the Unix epoch at which the key
    /// became active.
    pub rolling_start_interval_number: u32,
    /// Number of 10-minute intervals the key was active for. Signed so the
    /// range filter can judge out-of-range client values, negatives included.
    pub rolling_period: i32,
    /// Opaque risk level, passed through to storage unvalidated.
    pub transmission_risk_level: i32,
    /// Marks synthetic padding traffic.
    pub fake: bool,
}

impl TemporaryExposureKey {
    /// Decode the base64 key material. Length is not checked here; that is
    /// the encoding filter's job.
    pub fn decoded_key_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(&self.key_data)
    }

    /// UTC timestamp at which the key became active.
    pub fn rolling_start(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.rolling_start_interval_number) * INTERVAL_SECS, 0)
    }

    /// Calendar date the key is effective for, derived from the rolling
    /// start interval.
    pub fn derived_date(&self) -> Option<NaiveDate> {
        self.rolling_start().map(|ts| ts.date_naive())
    }

    /// Short SHA-256 digest of the encoded key material, for log lines.
    /// Raw key data must never be logged.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.key_data.as_bytes());
        hex::encode(hasher.finalize())[..12].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_with_interval(interval: u32) -> TemporaryExposureKey {
        TemporaryExposureKey {
            key_data: general_purpose::STANDARD.encode([0xABu8; KEY_DATA_LENGTH]),
            rolling_start_interval_number: interval,
            rolling_period: MAX_ROLLING_PERIOD,
            transmission_risk_level: 5,
            fake: false,
        }
    }

    #[test]
    fn test_decoded_key_data_length() {
        let key = key_with_interval(0);
        assert_eq!(key.decoded_key_data().unwrap().len(), KEY_DATA_LENGTH);
    }

    #[test]
    fn test_derived_date_epoch() {
        // Interval 0 is midnight 1970-01-01; interval 144 is the next day.
        assert_eq!(
            key_with_interval(0).derived_date(),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
        assert_eq!(
            key_with_interval(144).derived_date(),
            NaiveDate::from_ymd_opt(1970, 1, 2)
        );
        // Last interval of the first day still maps to it.
        assert_eq!(
            key_with_interval(143).derived_date(),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
    }

    #[test]
    fn test_digest_is_short_and_stable() {
        let key = key_with_interval(0);
        let digest = key.digest();
        assert_eq!(digest.len(), 12);
        assert_eq!(digest, key.digest());
        assert_ne!(digest, key_with_interval(0).key_data);
    }
}
