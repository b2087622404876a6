//! Canonical JSON encoding and payload-derived seeds.
//!
//! Determinism in the pipelines hinges on a stable seed: the payload is
//! canonicalized (object keys recursively sorted, compact encoding), hashed
//! with SHA-256, and the first 8 hex characters of the digest become a
//! 32-bit seed. The same seed also forms the `req_{seed:08x}` request id.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::domain::error::{DlasError, Result};

/// Constant offset applied to every seed before constructing a generator.
///
/// Decorrelates the assess and incentive draw streams when both run over
/// the same payload. Changing this changes every drawn output value.
pub const SEED_OFFSET: u64 = 42;

fn canonicalize(value: &Value) -> Result<Value> {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();

            let mut sorted = serde_json::Map::with_capacity(map.len());
            for key in keys {
                if let Some(inner) = map.get(key) {
                    sorted.insert(key.clone(), canonicalize(inner)?);
                }
            }
            Ok(Value::Object(sorted))
        }
        Value::Array(items) => {
            let canonical = items.iter().map(canonicalize).collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(canonical))
        }
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if !f.is_finite() {
                    return Err(DlasError::Canonical(
                        "non-finite numbers are not permitted in canonical JSON".to_string(),
                    ));
                }
            }
            Ok(Value::Number(n.clone()))
        }
        other => Ok(other.clone()),
    }
}

/// Encode a value in canonical form: recursively sorted object keys,
/// compact separators, finite numbers only. Array order is preserved.
pub fn canonical_json(value: &Value) -> Result<String> {
    let canonical = canonicalize(value)?;
    Ok(serde_json::to_string(&canonical)?)
}

/// Derive a stable 32-bit seed from the canonical encoding of `value`.
pub fn stable_seed(value: &Value) -> Result<u32> {
    let canonical = canonical_json(value)?;
    let hex_digest = hex::encode(Sha256::digest(canonical.as_bytes()));
    u32::from_str_radix(&hex_digest[..8], 16)
        .map_err(|e| DlasError::Canonical(format!("seed truncation failed: {e}")))
}
