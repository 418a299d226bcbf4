//! crates/vp_io/src/hasher.rs
//!
//! SHA-256 fingerprints over canonical JSON.
//!
//! - Use `sha256_canonical(..)` for serializable values (goes through canonical_json).
//! - Use `sha256_hex(..)` for raw bytes.
//! - Hex digests are always lowercase, 64 chars.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::canonical_json::to_canonical_json_bytes;

#[derive(Error, Debug)]
pub enum HashError {
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, HashError> {
    let v = serde_json::to_value(value)?;
    Ok(sha256_hex(&to_canonical_json_bytes(&v)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = json!({"threshold": 270, "tie_value": 269});
        let b = json!({"tie_value": 269, "threshold": 270});
        assert_eq!(sha256_canonical(&a).unwrap(), sha256_canonical(&b).unwrap());
    }

    #[test]
    fn canonical_hash_respects_array_order() {
        let a = json!([{"name": "X"}, {"name": "Y"}]);
        let b = json!([{"name": "Y"}, {"name": "X"}]);
        assert_ne!(sha256_canonical(&a).unwrap(), sha256_canonical(&b).unwrap());
    }
}
