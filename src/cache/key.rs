//! Key Derivation Module
//!
//! Default request keying and value size estimation, both built on JSON
//! serialization.

use serde::Serialize;

use crate::error::Result;

// == Default Key ==
/// Derives a cache key by serializing the request to JSON.
///
/// serde_json keeps map keys ordered, so structurally equal requests
/// produce the same key string. Serialization failures propagate to the
/// caller untouched.
pub fn default_key<R: Serialize>(request: &R) -> Result<String> {
    Ok(serde_json::to_string(request)?)
}

// == Size Estimation ==
/// Approximates the in-memory cost of a value as twice its serialized
/// JSON length (two bytes per code unit).
///
/// This is a reporting aid, not an enforced bound.
pub fn estimate_size<T: Serialize>(value: &T) -> Result<usize> {
    Ok(serde_json::to_string(value)?.len() * 2)
}
