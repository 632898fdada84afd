use result_envelope::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, IntoEnvelope, PartialEq)]
struct SimpleResult {
    id: u32,
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoEnvelope)]
struct GenericResult<T> {
    value: T,
}

#[test]
fn given_simple_struct_when_using_derive_macro_then_creates_success_envelope() {
    let result = SimpleResult {
        id: 42,
        name: "Test Result".to_string(),
    };

    let envelope = result.clone().into_envelope();

    assert_eq!(envelope.code(), 200);
    assert_eq!(envelope.content(), Some(&result));
    assert!(envelope.message().is_none());
    assert!(envelope.is_success());
}

#[test]
fn given_generic_struct_when_using_derive_macro_then_creates_envelope() {
    let envelope = GenericResult { value: "text".to_string() }.into_envelope();
    assert_eq!(envelope.content().map(|r| r.value.as_str()), Some("text"));

    let envelope = GenericResult { value: 7i32 }.into_envelope();
    assert!(envelope.validate().is_ok());
}

#[test]
fn given_derived_envelope_when_serializing_then_content_is_nested() {
    let envelope = SimpleResult {
        id: 123,
        name: "Serialization Test".to_string(),
    }
    .into_envelope();

    let parsed: serde_json::Value =
        serde_json::from_str(&envelope.to_json().expect("Should serialize")).unwrap();
    assert_eq!(parsed["content"]["id"], 123);
    assert_eq!(parsed["content"]["name"], "Serialization Test");
    assert_eq!(parsed["code"], 200);
}
