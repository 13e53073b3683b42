//! Dual token-verifier tests
//!
//! The gate's standalone HMAC backend and the handler-path JWT backend
//! must accept and reject exactly the same tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sealed_chat_node::auth::{HmacVerifier, JwtVerifier, TokenService, TokenVerifier};
use std::time::{SystemTime, UNIX_EPOCH};

const SECRET: &[u8] = b"unit-test-signing-secret";

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[test]
fn test_hmac_verifier_accepts_issued_token() {
    let tokens = TokenService::new(SECRET);
    let gate = HmacVerifier::new(SECRET);

    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();
    let claims = gate.verify(&token).expect("gate must accept issued token");

    assert_eq!(claims.sub, "user-1");
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.username, "alice");
}

#[test]
fn test_both_backends_agree_on_valid_token() {
    let tokens = TokenService::new(SECRET);
    let token = tokens.issue("user-2", "b@c.com", "bob").unwrap();

    let jwt = JwtVerifier::new(tokens).verify(&token);
    let hmac = HmacVerifier::new(SECRET).verify(&token);
    assert_eq!(jwt, hmac);
}

#[test]
fn test_hmac_verifier_rejects_tampered_signature() {
    let tokens = TokenService::new(SECRET);
    let gate = HmacVerifier::new(SECRET);

    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let sig = &parts[2];
    let flipped = if sig.starts_with('A') { "B" } else { "A" };
    parts[2] = format!("{}{}", flipped, &sig[1..]);

    assert!(gate.verify(&parts.join(".")).is_none());
}

#[test]
fn test_hmac_verifier_rejects_wrong_secret() {
    let tokens = TokenService::new(b"a-different-secret");
    let gate = HmacVerifier::new(SECRET);

    let token = tokens.issue("user-1", "a@b.com", "alice").unwrap();
    assert!(gate.verify(&token).is_none());
}

#[test]
fn test_hmac_verifier_rejects_expired() {
    let tokens = TokenService::new(SECRET);
    let gate = HmacVerifier::new(SECRET);

    let token = tokens
        .issue_at("user-1", "a@b.com", "alice", now() - 8 * 24 * 60 * 60)
        .unwrap();
    assert!(gate.verify(&token).is_none());
}

#[test]
fn test_hmac_verifier_rejects_malformed() {
    let gate = HmacVerifier::new(SECRET);
    assert!(gate.verify("").is_none());
    assert!(gate.verify("only.two").is_none());
    assert!(gate.verify("one.two.three.four").is_none());
    assert!(gate.verify("%%%.%%%.%%%").is_none());
}

/// A token claiming `alg: none` must never pass, signature or not.
#[test]
fn test_hmac_verifier_rejects_alg_none() {
    let gate = HmacVerifier::new(SECRET);

    let header = URL_SAFE_NO_PAD.encode(br#"{"typ":"JWT","alg":"none"}"#);
    let exp = now() + 3600;
    let payload = URL_SAFE_NO_PAD.encode(
        format!(
            r#"{{"sub":"user-1","email":"a@b.com","username":"alice","iat":{},"exp":{}}}"#,
            now(),
            exp
        )
        .as_bytes(),
    );

    let unsigned = format!("{}.{}.", header, payload);
    assert!(gate.verify(&unsigned).is_none());

    let garbage_sig = format!("{}.{}.{}", header, payload, URL_SAFE_NO_PAD.encode(b"sig"));
    assert!(gate.verify(&garbage_sig).is_none());
}
