//! Property-based tests for canonical serialization and signing
//!
//! These tests verify the interoperability contract with the remote
//! verifier: canonical output is independent of field insertion order,
//! reserved fields never reach the signing input, and detached signatures
//! survive exactly the mutations they should.

use aura_link_core::{
    canonicalize, AppId, AppUserId, SessionKeyPair, SponsorOperation, Timestamp, RESERVED_FIELDS,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Generate arbitrary JSON-safe field names, avoiding the reserved set
fn arb_field_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-zA-Z][a-zA-Z0-9_]{0,15}")
        .unwrap()
        .prop_filter("reserved field", |name| {
            !RESERVED_FIELDS.contains(&name.as_str())
        })
}

/// Generate arbitrary scalar JSON values
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        prop::string::string_regex(r"[a-zA-Z0-9 ]{0,24}")
            .unwrap()
            .prop_map(Value::from),
    ]
}

/// Generate arbitrary flat records as field/value pairs
fn arb_record_fields() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((arb_field_name(), arb_scalar()), 0..12)
}

fn build_record<'a>(fields: impl Iterator<Item = &'a (String, Value)>) -> Value {
    let mut map = Map::new();
    for (name, value) in fields {
        map.insert(name.clone(), value.clone());
    }
    Value::Object(map)
}

proptest! {
    /// Property: canonical output is independent of insertion order
    #[test]
    fn canonicalization_is_order_independent(fields in arb_record_fields()) {
        let forward = build_record(fields.iter());
        let reversed = build_record(fields.iter().rev());

        prop_assert_eq!(canonicalize(&forward), canonicalize(&reversed));
    }

    /// Property: canonicalization is stable across repeated calls
    #[test]
    fn canonicalization_is_deterministic(fields in arb_record_fields()) {
        let record = build_record(fields.iter());
        prop_assert_eq!(canonicalize(&record), canonicalize(&record));
    }

    /// Property: reserved fields never appear in canonical output
    #[test]
    fn reserved_fields_are_always_stripped(
        fields in arb_record_fields(),
        reserved_value in arb_scalar(),
    ) {
        let mut record = build_record(fields.iter());
        for field in RESERVED_FIELDS {
            record
                .as_object_mut()
                .unwrap()
                .insert(field.to_string(), reserved_value.clone());
        }

        let canonical = canonicalize(&record);
        for field in RESERVED_FIELDS {
            prop_assert!(!canonical.contains(&format!("\"{}\":", field)), "reserved field leaked");
        }

        // And stripping is equivalent to never having inserted them
        prop_assert_eq!(canonical, canonicalize(&build_record(fields.iter())));
    }

    /// Property: signed operations verify, and any non-reserved mutation
    /// breaks verification
    #[test]
    fn sign_verify_and_tamper(
        app in prop::string::string_regex(r"[a-zA-Z0-9]{1,16}").unwrap(),
        user in prop::string::string_regex(r"[a-f0-9]{64}").unwrap(),
        timestamp in 1u64..=4_000_000_000_000u64,
    ) {
        let pair = SessionKeyPair::generate().unwrap();
        let operation = SponsorOperation::new(
            AppId::new(app.clone()),
            AppUserId::new(user),
            Timestamp::new(timestamp),
        );

        let signed = operation.sign(&pair).unwrap();
        prop_assert!(signed.verify(&pair.public_key_bytes()).is_ok());

        let mut tampered = signed.clone();
        tampered.app = AppId::new(format!("{}x", app));
        prop_assert!(tampered.verify(&pair.public_key_bytes()).is_err());

        let mut tampered = signed;
        tampered.timestamp = Timestamp::new(timestamp + 1);
        prop_assert!(tampered.verify(&pair.public_key_bytes()).is_err());
    }
}

// ----------------------------------------------------------------------------
// Pinned Interoperability Scenarios
// ----------------------------------------------------------------------------

#[test]
fn sponsor_signing_scenario_is_reproducible() {
    let pair = SessionKeyPair::generate().unwrap();
    let operation = SponsorOperation::new(
        AppId::new("AuraDashboard"),
        AppUserId::new("abc123"),
        Timestamp::new(1_700_000_000_000),
    );

    let first = operation.sign(&pair).unwrap();
    let second = operation.sign(&pair).unwrap();
    assert_eq!(first.sig, second.sig);

    let mut shifted = operation;
    shifted.timestamp = Timestamp::new(1_700_000_000_001);
    assert_ne!(shifted.sign(&pair).unwrap().sig, first.sig);
}

#[test]
fn sessions_never_share_key_material() {
    let pairs: Vec<SessionKeyPair> = (0..32)
        .map(|_| SessionKeyPair::generate().unwrap())
        .collect();

    let unique: std::collections::HashSet<[u8; 32]> =
        pairs.iter().map(|p| p.public_key_bytes()).collect();
    assert_eq!(unique.len(), pairs.len());
}
