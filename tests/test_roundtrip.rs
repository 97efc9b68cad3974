use nested_qs::{Config, Encoding, Value};
use serde_json::json;

/// Stringifies `data`, checks the querystring, parses it back and checks the
/// result.
///
/// Parsing only ever produces strings, so `parsed` is `data` with every
/// scalar rendered as text (and whatever else does not survive the trip).
fn roundtrip(data: serde_json::Value, qs: &str, parsed: serde_json::Value) {
    let value: Value = serde_json::from_value(data).expect("value");
    let serialized = nested_qs::stringify(&value).expect("stringify");
    pretty_assertions::assert_eq!(serialized, qs);

    let deserialized = nested_qs::parse(&serialized);
    pretty_assertions::assert_eq!(serde_json::to_value(&deserialized).unwrap(), parsed);
}

/// For data made only of strings, sequences and mappings.
fn lossless(data: serde_json::Value, qs: &str) {
    roundtrip(data.clone(), qs, data);
}

// ========== BASIC MAPPINGS ==========

#[test]
fn flat_mapping() {
    lossless(json!({"a": "1", "b": "2"}), "a=1&b=2");
}

#[test]
fn nested_mapping() {
    lossless(json!({"a": {"b": {"c": "d"}}, "e": "f"}), "a[b][c]=d&e=f");
}

// ========== PRIMITIVE TYPES ==========

#[test]
fn primitive_types() {
    roundtrip(
        json!({
            "bool_val": true,
            "false_val": false,
            "i8_val": -128,
            "u64_val": 4294967295u64,
            "f64_val": 2.5,
            "string_val": "Hello, world! 你好世界",
        }),
        "bool_val=1&false_val=0&i8_val=-128&u64_val=4294967295&f64_val=2.5&\
         string_val=Hello%2C%20world!%20%E4%BD%A0%E5%A5%BD%E4%B8%96%E7%95%8C",
        json!({
            "bool_val": "1",
            "false_val": "0",
            "i8_val": "-128",
            "u64_val": "4294967295",
            "f64_val": "2.5",
            "string_val": "Hello, world! 你好世界",
        }),
    );
}

#[test]
fn edge_case_strings() {
    lossless(
        json!({
            "empty_string": "",
            "space_string": "   ",
            "special_chars": "!@#$%^&*()_+-=[]{}|;':,.<>?/~`",
            "crab": "🦀",
        }),
        "empty_string=&space_string=%20%20%20&\
         special_chars=!%40%23%24%25%5E%26*()_%2B-%3D[]%7B%7D%7C%3B'%3A%2C.%3C%3E%3F%2F~%60&\
         crab=%F0%9F%A6%80",
    );
}

#[test]
fn delimiters_inside_values() {
    lossless(
        json!({"eq": "x=y", "amp": "a&b", "brackets": "[z]", "plus": "1+1"}),
        "eq=x%3Dy&amp=a%26b&brackets=[z]&plus=1%2B1",
    );
}

// ========== SEQUENCES ==========

#[test]
fn sequence_of_strings() {
    lossless(json!({"ids": ["1", "2", "3"]}), "ids[]=1&ids[]=2&ids[]=3");
}

#[test]
fn sequence_in_nested_mapping() {
    lossless(
        json!({"a": {"b": ["x", "y"]}, "c": "d"}),
        "a[b][]=x&a[b][]=y&c=d",
    );
}

#[test]
fn single_element_sequence() {
    lossless(json!({"one": ["only"]}), "one[]=only");
}

// ========== LOSSY CASES ==========

#[test]
fn empty_sequence_vanishes() {
    roundtrip(json!({"a": [], "b": "1"}), "&b=1", json!({"b": "1"}));
    roundtrip(json!({"a": {"x": [], "y": []}}), "&", json!({}));
}

#[test]
fn empty_mapping_becomes_flag() {
    roundtrip(json!({"a": {}, "b": "1"}), "a=&b=1", json!({"a": "", "b": "1"}));
}

#[test]
fn null_becomes_empty_string() {
    roundtrip(json!({"a": null}), "a=", json!({"a": ""}));
}

#[test]
fn empty_strings_in_sequences_are_dropped() {
    roundtrip(
        json!({"a": ["", "x", null]}),
        "a[]=&a[]=x&a[]=",
        json!({"a": ["x"]}),
    );
}

// ========== ENCODINGS ==========

#[test]
fn every_encoding_parses_back() {
    let data = json!({"a b": {"c+d": ["e f", "g&h"]}, "i": "j=k"});
    let value: Value = serde_json::from_value(data.clone()).unwrap();
    for encoding in [Encoding::Component, Encoding::Strict, Encoding::Form] {
        let serialized = Config::new().escape(encoding).stringify(&value).unwrap();
        let parsed = nested_qs::parse(&serialized);
        pretty_assertions::assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            data,
            "{encoding:?}: {serialized}"
        );
    }
}

// ========== IDEMPOTENCE ==========

#[test]
fn parse_stringify_parse_is_stable() {
    for input in [
        "a=1&a=2&b[c]=3&b[d][]=4&b[d][]=5&flag",
        "x[y][z]=1&x[y][w]=2&v[]=a",
        "q=hello+world&r=%26%3D",
    ] {
        let first = nested_qs::parse(input);
        let serialized = nested_qs::stringify(&first.clone().into()).unwrap();
        let second = nested_qs::parse(&serialized);
        pretty_assertions::assert_eq!(first, second, "{input} -> {serialized}");
    }
}
