use crate::runtime::{FetchError, RequestCredentials, RequestMode, TransportFlags};
use crate::types::ResolvedResult;
use serde_json::{json, Value};

#[test]
fn guards_discriminate_on_the_tag() {
    let success: ResolvedResult<u64> = ResolvedResult::Success { value: 2 };
    assert!(success.is_succeeded());
    assert!(!success.has_validation_error());
    assert_eq!(success.success(), Some(&2));
    assert_eq!(success.validation_error(), None);

    let error: ResolvedResult<u64, String> = ResolvedResult::ValidationError {
        error: "err-t".to_owned(),
    };
    assert!(!error.is_succeeded());
    assert!(error.has_validation_error());
    assert_eq!(error.success(), None);
    assert_eq!(error.validation_error(), Some(&"err-t".to_owned()));
}

#[test]
fn map_success_leaves_the_validation_arm_untouched() {
    let success: ResolvedResult<u64, String> = ResolvedResult::Success { value: 2 };
    assert_eq!(
        success.map_success(|value| value.to_string()),
        ResolvedResult::Success {
            value: "2".to_owned(),
        }
    );

    let error: ResolvedResult<u64, String> = ResolvedResult::ValidationError {
        error: "err-t".to_owned(),
    };
    assert_eq!(
        error.map_success(|value| value.to_string()),
        ResolvedResult::ValidationError {
            error: "err-t".to_owned(),
        }
    );
}

#[test]
fn serializes_with_a_status_tag() {
    let success: ResolvedResult<Value> = ResolvedResult::Success {
        value: json!({ "id": 2 }),
    };
    assert_eq!(
        serde_json::to_value(&success).unwrap(),
        json!({ "status": "SUCCESS", "value": { "id": 2 } })
    );

    let error: ResolvedResult<Value> = ResolvedResult::ValidationError {
        error: json!({ "title": "err-t" }),
    };
    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({ "status": "VALIDATION_ERROR", "error": { "title": "err-t" } })
    );
}

#[test]
fn deserializes_from_the_tagged_form() {
    let result: ResolvedResult<Value> =
        serde_json::from_value(json!({ "status": "SUCCESS", "value": { "id": 2 } })).unwrap();
    assert_eq!(result.success(), Some(&json!({ "id": 2 })));
}

#[test]
fn fetch_error_exposes_code_and_message() {
    let error = FetchError::Http("Bad Request".to_owned());
    assert_eq!(error, FetchError::Http("Bad Request".to_owned()));
    assert_eq!(error.code(), 2);
    assert_eq!(error.to_string(), "HTTP error: Bad Request");
    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({ "code": 2, "message": "HTTP error: Bad Request" })
    );
}

#[test]
fn transport_flags_serialize_like_fetch_settings() {
    let flags = TransportFlags {
        mode: RequestMode::Cors,
        credentials: RequestCredentials::Include,
    };
    assert_eq!(
        serde_json::to_value(flags).unwrap(),
        json!({ "mode": "cors", "credentials": "include" })
    );
}
