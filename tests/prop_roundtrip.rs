//! Property-based round-trip tests.
//!
//! Generated data is restricted to what survives `parse(stringify(data))`
//! unchanged:
//! - leaves are strings (parsing never produces numbers or booleans),
//! - sequences are non-empty and hold non-empty strings (empty sequences
//!   are dropped by the encoder, empty strings by `[]` appends),
//! - mappings below the root are non-empty (an empty mapping comes back as
//!   a bare flag),
//! - keys contain no `[`, `]`, `=` or `&`, which keep their meaning after
//!   percent-decoding.
use nested_qs::Value;
use proptest::prelude::*;
use serde_json::Value as Json;

fn arb_key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ +%~.-]{1,8}"
}

fn arb_leaf() -> impl Strategy<Value = Json> {
    prop_oneof![
        "\\PC{0,12}".prop_map(Json::String),
        prop::collection::vec("\\PC{1,12}".prop_map(Json::String), 1..4).prop_map(Json::Array),
    ]
}

fn arb_tree() -> impl Strategy<Value = Json> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(arb_key(), inner, 1..4)
            .prop_map(|m| Json::Object(m.into_iter().collect()))
    })
}

fn arb_root() -> impl Strategy<Value = Json> {
    prop::collection::btree_map(arb_key(), arb_tree(), 0..5)
        .prop_map(|m| Json::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn roundtrip_is_lossless(data in arb_root()) {
        let value: Value = serde_json::from_value(data.clone()).unwrap();
        let qs = nested_qs::stringify(&value).unwrap();
        let parsed = serde_json::to_value(nested_qs::parse(&qs)).unwrap();
        prop_assert_eq!(parsed, data, "querystring: {}", qs);
    }

    #[test]
    fn parse_accepts_anything(input in "\\PC{0,40}") {
        let object = nested_qs::parse(&input);
        let qs = nested_qs::stringify(&object.into()).unwrap();
        nested_qs::parse(&qs);
    }

    #[test]
    fn parse_accepts_bracket_soup(input in "[a\\[\\]=&%+]{0,24}") {
        let object = nested_qs::parse(&input);
        prop_assert!(serde_json::to_value(&object).is_ok());
    }
}
