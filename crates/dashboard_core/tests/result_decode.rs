use dashboard_core::{decode_payload, is_valid_result, ResultError};
use serde_json::{json, Value};

#[test]
fn validator_rejects_non_objects() {
    assert!(!is_valid_result(&Value::Null));
    assert!(!is_valid_result(&json!(42)));
    assert!(!is_valid_result(&json!("sql_1")));
    assert!(!is_valid_result(&json!([1, 2, 3])));
}

#[test]
fn validator_requires_both_keys() {
    assert!(!is_valid_result(&json!({})));
    assert!(!is_valid_result(&json!({ "sql_1": [] })));
    assert!(!is_valid_result(&json!({ "sql_2": [] })));
}

#[test]
fn validator_requires_sequences() {
    assert!(!is_valid_result(&json!({ "sql_1": "x", "sql_2": [] })));
    assert!(!is_valid_result(&json!({ "sql_1": [], "sql_2": { "a": 1 } })));
}

#[test]
fn validator_accepts_empty_result_sets() {
    assert!(is_valid_result(&json!({ "sql_1": [], "sql_2": [] })));
}

#[test]
fn decode_accepts_structured_payload() {
    let payload = json!({
        "sql_1": [{ "label": "cat", "instance_count": 3 }],
        "sql_2": [{ "split": "train", "label": "cat", "objects": 2, "pct_within_split": 1.0 }],
    });

    let result = decode_payload(&payload).expect("decode ok");
    assert_eq!(result.sql_1.len(), 1);
    assert_eq!(result.sql_1[0].label, "cat");
    assert_eq!(result.sql_1[0].instance_count, 3);
    assert_eq!(result.sql_2[0].split, "train");
    assert_eq!(result.sql_2[0].objects, 2);
}

#[test]
fn decode_parses_string_payload() {
    // The backend stores results as json.dumps output, so the common case
    // is a JSON-encoded string.
    let text = r#"{"sql_1":[{"label":"dog","instance_count":5}],"sql_2":[]}"#;
    let payload = Value::String(text.to_string());

    let result = decode_payload(&payload).expect("decode ok");
    assert_eq!(result.sql_1[0].label, "dog");
    assert!(result.sql_2.is_empty());
}

#[test]
fn decode_rejects_unparseable_string() {
    let payload = Value::String("not json at all".to_string());
    let err = decode_payload(&payload).unwrap_err();
    assert!(matches!(err, ResultError::Json(_)));
}

#[test]
fn decode_rejects_wrong_shape() {
    assert_eq!(decode_payload(&Value::Null).unwrap_err(), ResultError::Shape);
    assert_eq!(
        decode_payload(&json!({ "sql_1": [] })).unwrap_err(),
        ResultError::Shape
    );
    // A string payload that parses but holds the wrong shape fails the same
    // way as a structured one.
    let payload = Value::String(r#"{"sql_1": 7, "sql_2": []}"#.to_string());
    assert_eq!(decode_payload(&payload).unwrap_err(), ResultError::Shape);
}

#[test]
fn decode_rejects_malformed_rows() {
    let payload = json!({
        "sql_1": [{ "label": "cat" }],
        "sql_2": [],
    });
    let err = decode_payload(&payload).unwrap_err();
    assert!(matches!(err, ResultError::Rows(_)));
}
