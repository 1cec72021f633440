use super::*;

const SIGN_IN_BODY: &str = r#"{
    "uid": "1b017638-1b1c-4e75-8a16-389f72dfa98e",
    "token": {
        "access_token": "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9.e30.sig",
        "token_type": "Bearer"
    }
}"#;

// =============================================================================
// Empty record
// =============================================================================

#[test]
fn default_record_is_empty() {
    let record = TokenRecord::default();
    assert!(record.is_empty());
    assert!(record.uid.is_none());
    assert!(record.token.is_empty());
}

#[test]
fn empty_record_serializes_as_empty_token_object() {
    let json = serde_json::to_value(TokenRecord::default()).unwrap();
    assert_eq!(json, serde_json::json!({ "token": {} }));
}

#[test]
fn empty_token_object_parses_as_empty_record() {
    let record = TokenRecord::from_json(r#"{"token":{}}"#).unwrap();
    assert_eq!(record, TokenRecord::default());
}

// =============================================================================
// Sign-in shape
// =============================================================================

#[test]
fn from_json_parses_sign_in_response() {
    let record = TokenRecord::from_json(SIGN_IN_BODY).unwrap();
    assert_eq!(record.uid.as_deref(), Some("1b017638-1b1c-4e75-8a16-389f72dfa98e"));
    assert_eq!(record.token.token_type, "Bearer");
    assert!(record.token.access_token.starts_with("eyJ0"));
    assert!(record.token.exp.is_none());
    assert!(!record.is_empty());
}

#[test]
fn from_json_keeps_optional_expiry() {
    let record =
        TokenRecord::from_json(r#"{"uid":"u1","token":{"access_token":"a","token_type":"Bearer","exp":1692524417}}"#)
            .unwrap();
    assert_eq!(record.token.exp, Some(1_692_524_417));
}

#[test]
fn from_json_rejects_non_object() {
    assert!(TokenRecord::from_json("\"token\"").is_err());
}

#[test]
fn serialize_omits_missing_expiry() {
    let record = TokenRecord::new("u1", AccessToken::bearer("a"));
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json, serde_json::json!({ "uid": "u1", "token": { "access_token": "a", "token_type": "Bearer" } }));
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn authorization_header_uses_token_type() {
    let record = TokenRecord::new("u1", AccessToken::bearer("abc"));
    assert_eq!(record.authorization_header().as_deref(), Some("Bearer abc"));
}

#[test]
fn authorization_header_defaults_scheme() {
    let token = AccessToken { access_token: "abc".to_owned(), token_type: String::new(), exp: None };
    let record = TokenRecord::new("u1", token);
    assert_eq!(record.authorization_header().as_deref(), Some("Bearer abc"));
}

#[test]
fn authorization_header_none_for_empty_token() {
    assert!(TokenRecord::default().authorization_header().is_none());
}

#[test]
fn is_expired_at_compares_inclusive() {
    let mut token = AccessToken::bearer("a");
    token.exp = Some(100);
    let record = TokenRecord::new("u1", token);
    assert!(!record.is_expired_at(99));
    assert!(record.is_expired_at(100));
    assert!(record.is_expired_at(101));
}

#[test]
fn is_expired_at_false_without_expiry() {
    let record = TokenRecord::new("u1", AccessToken::bearer("a"));
    assert!(!record.is_expired_at(i64::MAX));
}

#[test]
fn from_json_floors_fractional_expiry() {
    let record =
        TokenRecord::from_json(r#"{"uid":"u1","token":{"access_token":"a","token_type":"Bearer","exp":1692524417.75}}"#)
            .unwrap();
    assert_eq!(record.token.exp, Some(1_692_524_417));
    assert!(record.is_expired_at(1_692_524_417));
    assert!(!record.is_expired_at(1_692_524_416));
}

#[test]
fn from_json_accepts_null_expiry() {
    let record = TokenRecord::from_json(r#"{"token":{"access_token":"a","exp":null}}"#).unwrap();
    assert!(record.token.exp.is_none());
}
