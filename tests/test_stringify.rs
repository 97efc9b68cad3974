use nested_qs::{Config, Encoding, Object, Value};
use serde_json::json;

/// Builds a value from JSON, keeping the key order of the literal.
fn value(json: serde_json::Value) -> Value {
    serde_json::from_value(json).expect("value")
}

fn stringify(json: serde_json::Value) -> String {
    nested_qs::stringify(&value(json)).expect("stringify")
}

#[test]
fn stringify_flat_mapping() {
    assert_eq!(stringify(json!({"a": 1})), "a=1");
    insta::assert_snapshot!(stringify(json!({"a": 1, "b": "two", "c": 3.25})), @"a=1&b=two&c=3.25");
}

#[test]
fn stringify_sequence() {
    assert_eq!(stringify(json!({"a": [1, 2]})), "a[]=1&a[]=2");
}

#[test]
fn stringify_nested_mapping() {
    assert_eq!(stringify(json!({"a": {"b": 1}})), "a[b]=1");
    insta::assert_snapshot!(
        stringify(json!({"a": {"b": {"c": [true, false]}}, "d": null})),
        @"a[b][c][]=1&a[b][c][]=0&d="
    );
}

#[test]
fn stringify_struct_like() {
    let params = json!({
        "id": 42,
        "name": "Acme",
        "phone": 12345,
        "address": {"city": "Carrot City", "postcode": "12345"},
        "user_ids": [1, 2, 3, 4],
    });
    insta::assert_snapshot!(
        stringify(params),
        @"id=42&name=Acme&phone=12345&address[city]=Carrot%20City&address[postcode]=12345&user_ids[]=1&user_ids[]=2&user_ids[]=3&user_ids[]=4"
    );
}

#[test]
fn stringify_escapes_keys_and_values() {
    insta::assert_snapshot!(
        stringify(json!({"a b": "c+d", "greeting": "Hello, world! 你好世界"})),
        @"a%20b=c%2Bd&greeting=Hello%2C%20world!%20%E4%BD%A0%E5%A5%BD%E4%B8%96%E7%95%8C"
    );
    insta::assert_snapshot!(
        stringify(json!({"special": "!@#$%^&*()_+-=[]{}|;':,.<>?/~`"})),
        @"special=!%40%23%24%25%5E%26*()_%2B-%3D[]%7B%7D%7C%3B'%3A%2C.%3C%3E%3F%2F~%60"
    );
}

#[test]
fn stringify_empty_containers() {
    assert_eq!(stringify(json!({"a": [], "b": {}})), "&b=");
    assert_eq!(stringify(json!({"a": {"x": [], "y": []}})), "&");
    assert_eq!(stringify(json!({"a": {"x": []}})), "a=");
    assert_eq!(stringify(json!({})), "");
    assert_eq!(stringify(json!({"a": {"b": {}}})), "a[b]=");
}

#[test]
fn stringify_absent_values() {
    let object: Object = [
        ("none", Value::Null),
        ("missing", Value::Undefined),
        ("callback", Value::Function),
        ("opt", Value::from(None::<i32>)),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        nested_qs::stringify(&object.into()).unwrap(),
        "none=&missing=&callback=&opt="
    );
}

#[test]
fn stringify_with_custom_delimiters() {
    let config = Config::new().separator(";").assigner(":");
    let value = value(json!({"a": [1, 2], "b": {"c": "d"}}));
    assert_eq!(config.stringify(&value).unwrap(), "a[]:1;a[]:2;b[c]:d");
}

#[test]
fn stringify_with_key_prefix() {
    let config = Config::new().key_prefix("q");
    assert_eq!(
        config.stringify(&value(json!({"a": 1, "b": [2]}))).unwrap(),
        "q[a]=1&q[b][]=2"
    );
    assert_eq!(config.stringify(&value(json!([1, 2]))).unwrap(), "q[]=1&q[]=2");
    assert_eq!(config.stringify(&value(json!({}))).unwrap(), "q=");
}

#[test]
fn stringify_with_encodings() {
    let value = value(json!({"a": {"b c": "d e"}}));
    assert_eq!(
        Config::new().stringify(&value).unwrap(),
        "a[b%20c]=d%20e"
    );
    assert_eq!(
        Config::new().escape(Encoding::Strict).stringify(&value).unwrap(),
        "a%5Bb%20c%5D=d%20e"
    );
    assert_eq!(
        Config::new().escape(Encoding::Form).stringify(&value).unwrap(),
        "a%5Bb+c%5D=d+e"
    );
}

#[test]
fn stringify_with_custom_escape() {
    let config = Config::new().escape(|s: &str| s.replace('a', "@"));
    assert_eq!(
        config.stringify(&value(json!({"a": "banana"}))).unwrap(),
        "@=b@n@n@"
    );
}

#[test]
fn stringify_cyclic_reference() {
    let object = Object::new();
    object.insert("name", "loop");
    object.insert("itself", object.clone());

    let err = nested_qs::stringify(&object.clone().into()).unwrap_err();
    assert!(matches!(err, nested_qs::Error::CyclicReference));
    assert_eq!(err.to_string(), "cyclic reference: a mapping contains itself");

    // the next call starts from a clean guard
    object.borrow_mut().shift_remove("itself");
    assert_eq!(
        nested_qs::stringify(&object.clone().into()).unwrap(),
        "name=loop"
    );
}

#[test]
fn stringify_deep_cycle() {
    let a = Object::new();
    let b = Object::new();
    let c = Object::new();
    a.insert("b", b.clone());
    b.insert("c", c.clone());
    c.insert("list", Value::from(vec![Value::from(1), Value::from(a.clone())]));

    assert!(nested_qs::stringify(&a.clone().into()).unwrap_err().is_cyclic());
    // starting inside the cycle fails the same way
    assert!(nested_qs::stringify(&c.clone().into()).unwrap_err().is_cyclic());
    c.borrow_mut().clear();
}

#[test]
fn stringify_to_writer() {
    let mut buffer = Vec::new();
    nested_qs::stringify_to_writer(&value(json!({"a": [1, 2]})), &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "a[]=1&a[]=2");
}

#[test]
fn stringify_numbers() {
    insta::assert_snapshot!(
        stringify(json!({"int": -7, "float": 1.0, "frac": 0.5, "big": 18446744073709551615u64})),
        @"int=-7&float=1&frac=0.5&big=18446744073709552000"
    );
    let object: Object = [("nan", f64::NAN), ("inf", f64::INFINITY)].into_iter().collect();
    assert_eq!(
        nested_qs::stringify(&object.into()).unwrap(),
        "nan=NaN&inf=Infinity"
    );
    insta::assert_snapshot!(
        stringify(json!({"a": 9007199254740994.0, "b": 1e20, "c": 1e21, "d": 1.5e-7})),
        @"a=9007199254740994&b=100000000000000000000&c=1e%2B21&d=1.5e-7"
    );
}
