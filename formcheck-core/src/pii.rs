// formcheck-core/src/pii.rs
//! Helpers for keeping field values out of debug logs.
//!
//! Form values are personal data (PESEL, phone, email). Debug output shows a
//! masked placeholder unless `FORMCHECK_ALLOW_DEBUG_PII=true` is set, and a
//! stable fingerprint lets log lines about the same value be correlated.

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use hex;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("FORMCHECK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Replaces a value with a placeholder that only reveals its length.
pub fn mask_value(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[MASKED]".to_string()
    } else {
        format!("[MASKED: {} chars]", len)
    }
}

/// The value itself when PII debugging is enabled, otherwise [`mask_value`].
pub fn loggable_value(value: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        value.to_string()
    } else {
        mask_value(value)
    }
}

/// Short, stable fingerprint of a field value.
///
/// Surrounding whitespace is ignored so that `" 20-123"` and `"20-123"`
/// correlate. Only the first 12 hex characters of the digest are kept.
pub fn value_fingerprint(field: &str, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(field.as_bytes());
    hasher.update(b":");
    hasher.update(value.trim().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}
