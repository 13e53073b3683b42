//! Session token lifecycle tests

use sealed_chat_node::auth::{extract_bearer_token, TokenService, TOKEN_TTL_SECS};
use std::time::{SystemTime, UNIX_EPOCH};

const SECRET: &[u8] = b"unit-test-signing-secret";

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[test]
fn test_issue_verify_roundtrip() {
    let tokens = TokenService::new(SECRET);
    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();

    let claims = tokens.verify(&token).expect("fresh token must verify");
    assert_eq!(claims.sub, "user-1");
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
}

#[test]
fn test_token_is_compact_jws() {
    let tokens = TokenService::new(SECRET);
    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_expired_token_rejected() {
    let tokens = TokenService::new(SECRET);

    // Issued 8 days ago: one day past the 7-day window
    let issued_at = now() - 8 * 24 * 60 * 60;
    let token = tokens
        .issue_at("user-1", "a@b.com", "alice", issued_at)
        .unwrap();

    assert!(tokens.verify(&token).is_none());
}

#[test]
fn test_token_valid_within_window() {
    let tokens = TokenService::new(SECRET);

    // Issued 6 days ago: still inside the window
    let issued_at = now() - 6 * 24 * 60 * 60;
    let token = tokens
        .issue_at("user-1", "a@b.com", "alice", issued_at)
        .unwrap();

    assert!(tokens.verify(&token).is_some());
}

#[test]
fn test_wrong_secret_rejected() {
    let tokens = TokenService::new(SECRET);
    let other = TokenService::new(b"some-other-secret");

    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();
    assert!(other.verify(&token).is_none());
}

#[test]
fn test_tampered_token_rejected() {
    let tokens = TokenService::new(SECRET);
    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();

    // Swap one character of the payload segment
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let payload = &parts[1];
    let flipped = if payload.starts_with('A') { "B" } else { "A" };
    parts[1] = format!("{}{}", flipped, &payload[1..]);
    let tampered = parts.join(".");

    assert!(tokens.verify(&tampered).is_none());
}

#[test]
fn test_garbage_token_rejected() {
    let tokens = TokenService::new(SECRET);
    assert!(tokens.verify("").is_none());
    assert!(tokens.verify("not-a-token").is_none());
    assert!(tokens.verify("a.b").is_none());
    assert!(tokens.verify("a.b.c.d").is_none());
}

#[test]
fn test_extract_bearer_token() {
    assert_eq!(extract_bearer_token(None), None);
    assert_eq!(extract_bearer_token(Some("")), None);
    assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    // Scheme is case-sensitive and exact
    assert_eq!(extract_bearer_token(Some("bearer abc")), None);
    assert_eq!(extract_bearer_token(Some("Basic dXNlcjpwdw==")), None);
    assert_eq!(extract_bearer_token(Some("Bearerabc")), None);
}
