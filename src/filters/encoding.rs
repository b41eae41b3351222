//! Key material encoding assertion.
//!
//! The one all-or-nothing check: every key in the submission must carry
//! base64 that decodes to exactly 16 bytes. One bad key poisons the whole
//! batch, because a client producing malformed key material cannot be
//! trusted about the rest of its payload either.

use crate::error::ValidationError;
use crate::model::key::{TemporaryExposureKey, KEY_DATA_LENGTH};
use crate::pipeline::context::SubmissionContext;
use crate::pipeline::engine::KeyFilter;

pub struct AssertValidEncoding;

impl KeyFilter for AssertValidEncoding {
    fn name(&self) -> &'static str {
        "AssertValidEncoding"
    }

    fn filter(
        &self,
        ctx: &SubmissionContext,
        keys: Vec<TemporaryExposureKey>,
    ) -> Result<Vec<TemporaryExposureKey>, ValidationError> {
        let log_ctx = ctx.log_context();

        for key in &keys {
            match key.decoded_key_data() {
                Ok(decoded) if decoded.len() == KEY_DATA_LENGTH => {}
                Ok(decoded) => {
                    log::warn!(
                        "{} KEY_ENCODING_INVALID decoded_len={} expected={}",
                        log_ctx.with_key(&key.digest()),
                        decoded.len(),
                        KEY_DATA_LENGTH
                    );
                    return Err(ValidationError::InvalidEncoding {
                        detail: format!(
                            "key {} decodes to {} bytes, expected {}",
                            key.digest(),
                            decoded.len(),
                            KEY_DATA_LENGTH
                        ),
                    });
                }
                Err(e) => {
                    log::warn!(
                        "{} KEY_ENCODING_INVALID error={}",
                        log_ctx.with_key(&key.digest()),
                        e
                    );
                    return Err(ValidationError::InvalidEncoding {
                        detail: format!("key {} is not valid base64: {}", key.digest(), e),
                    });
                }
            }
        }

        Ok(keys)
    }
}
