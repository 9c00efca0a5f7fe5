//! Canonical JSON: object keys sorted recursively, arrays left in order, compact text.
//!
//! Two values that differ only in object key order canonicalize to the same text and
//! therefore the same content hash.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Rebuild `value` with every object's keys in lexicographic order.
///
/// Recursive; JSON read off the wire is already depth-limited by the serde_json parser.
pub fn canonicalize(value: &Value) -> Value {
  match value {
    Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
    Value::Object(map) => {
      let mut keys: Vec<&String> = map.keys().collect();
      keys.sort();
      let mut out = Map::with_capacity(map.len());
      for k in keys {
        out.insert(k.clone(), canonicalize(&map[k]));
      }
      Value::Object(out)
    }
    other => other.clone(),
  }
}

pub fn to_canonical_string(value: &Value) -> Result<String, AppError> {
  Ok(serde_json::to_string(&canonicalize(value))?)
}

/// SHA-256 of the canonical text as `0x`-prefixed hex (fits a `bytes32` field).
pub fn hash_text(canonical: &str) -> String {
  let mut h = Sha256::new();
  h.update(canonical.as_bytes());
  format!("0x{}", hex::encode(h.finalize()))
}

pub fn content_hash(value: &Value) -> Result<String, AppError> {
  Ok(hash_text(&to_canonical_string(value)?))
}
