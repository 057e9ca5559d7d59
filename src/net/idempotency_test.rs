use super::*;

#[test]
fn generate_yields_distinct_v4_keys() {
    let a = IdempotencyKey::generate();
    let b = IdempotencyKey::generate();
    assert_ne!(a, b);
    assert_eq!(a.as_uuid().get_version_num(), 4);
}

#[test]
fn display_is_hyphenated_uuid() {
    let key = IdempotencyKey::generate();
    let text = key.to_string();
    assert_eq!(text.len(), 36);
    assert_eq!(Uuid::parse_str(&text).unwrap(), key.as_uuid());
}
