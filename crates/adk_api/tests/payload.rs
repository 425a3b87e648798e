use adk_api::{Content, Part, RunRequest};
use serde_json::json;

#[test]
fn run_request_serializes_with_camel_case_wire_names() {
    let request = RunRequest::new("app", "u_999", "session-1", "show revenue by month");
    let value = serde_json::to_value(&request).expect("serialize run request");

    assert_eq!(
        value,
        json!({
            "appName": "app",
            "userId": "u_999",
            "sessionId": "session-1",
            "newMessage": {
                "parts": [{"text": "show revenue by month"}],
                "role": "user"
            },
            "streaming": true
        })
    );
}

#[test]
fn run_request_streaming_defaults_to_true_when_absent() {
    let request: RunRequest = serde_json::from_value(json!({
        "appName": "app",
        "userId": "u",
        "sessionId": "s",
        "newMessage": {"parts": [{"text": "hi"}], "role": "user"}
    }))
    .expect("deserialize run request");

    assert!(request.streaming);
    assert_eq!(request.new_message, Content::user_text("hi"));
}

#[test]
fn content_joined_text_preserves_part_order() {
    let content = Content {
        parts: vec![Part::text("a"), Part::default(), Part::text("b"), Part::text("c")],
        role: None,
    };

    assert_eq!(content.joined_text(), "abc");
}

#[test]
fn content_without_role_omits_role_field() {
    let content = Content {
        parts: vec![Part::text("x")],
        role: None,
    };
    let value = serde_json::to_value(&content).expect("serialize content");
    assert_eq!(value, json!({"parts": [{"text": "x"}]}));
}
