//! Instance fingerprinting.

use sha2::{Digest, Sha256};

use crate::error::GeneratorResult;
use crate::models::Instance;

/// SHA-256 of arbitrary content as lower-case hex.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fingerprint of an instance: the checksum of its compact JSON form.
///
/// Two runs with the same seed and candidate pool yield the same fingerprint.
pub fn instance_checksum(instance: &Instance) -> GeneratorResult<String> {
    let json = serde_json::to_string(instance)?;
    Ok(calculate_checksum(&json))
}
