//! Canonical record serialization
//!
//! The remote node verifies signatures by recomputing the canonical form of
//! the submitted record, so both sides must produce identical bytes for the
//! same logical record: reserved signature/hash fields stripped, keys in
//! lexicographic order, compact formatting. `serde_json`'s default object
//! map is a `BTreeMap`, which provides the ordering; this crate must never
//! enable the `preserve_order` feature.

use serde::Serialize;
use serde_json::Value;

use crate::Result;

// ----------------------------------------------------------------------------
// Reserved Fields
// ----------------------------------------------------------------------------

/// Fields excluded from the signing input regardless of where they appear
/// in insertion order
pub const RESERVED_FIELDS: [&str; 4] = ["sig", "sig1", "sig2", "hash"];

// ----------------------------------------------------------------------------
// Canonicalization
// ----------------------------------------------------------------------------

/// Canonicalize a JSON value into its byte-stable string form
///
/// For objects, reserved fields are removed from the top level before
/// serialization. The function is total over any JSON value; non-object
/// values serialize as-is.
pub fn canonicalize(record: &Value) -> String {
    match record {
        Value::Object(map) => {
            let mut stripped = map.clone();
            for field in RESERVED_FIELDS {
                stripped.remove(field);
            }
            Value::Object(stripped).to_string()
        }
        other => other.to_string(),
    }
}

/// Canonicalize any serializable record
///
/// Converts through `serde_json::Value` so that key ordering is normalized
/// independently of the struct's field order.
pub fn canonicalize_record<T: Serialize>(record: &T) -> Result<String> {
    let value = serde_json::to_value(record)?;
    Ok(canonicalize(&value))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_sorted() {
        let record = json!({"zulu": 1, "alpha": 2, "mike": 3});
        assert_eq!(canonicalize(&record), r#"{"alpha":2,"mike":3,"zulu":1}"#);
    }

    #[test]
    fn test_reserved_fields_stripped() {
        let record = json!({
            "name": "Sponsor",
            "sig": "abc",
            "sig1": "def",
            "sig2": "ghi",
            "hash": "jkl",
        });
        assert_eq!(canonicalize(&record), r#"{"name":"Sponsor"}"#);
    }

    #[test]
    fn test_empty_sig_equals_absent_sig() {
        let with_empty = json!({"app": "Aura", "sig": ""});
        let without = json!({"app": "Aura"});
        assert_eq!(canonicalize(&with_empty), canonicalize(&without));
    }

    #[test]
    fn test_compact_output() {
        let record = json!({"a": [1, 2], "b": {"c": true}});
        assert_eq!(canonicalize(&record), r#"{"a":[1,2],"b":{"c":true}}"#);
    }

    #[test]
    fn test_integer_formatting_is_plain() {
        let record = json!({"timestamp": 1_700_000_000_000u64, "v": 6});
        assert_eq!(
            canonicalize(&record),
            r#"{"timestamp":1700000000000,"v":6}"#
        );
    }

    #[test]
    fn test_non_object_values_pass_through() {
        assert_eq!(canonicalize(&json!("plain")), "\"plain\"");
        assert_eq!(canonicalize(&json!(42)), "42");
    }

    #[test]
    fn test_nested_reserved_fields_are_kept() {
        // Only top-level reserved fields are part of the signing contract
        let record = json!({"meta": {"hash": "inner"}});
        assert_eq!(canonicalize(&record), r#"{"meta":{"hash":"inner"}}"#);
    }
}
