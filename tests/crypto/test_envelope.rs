//! Envelope encryption tests
//!
//! Round-trip, tamper detection and nonce behavior of the AES-256-GCM
//! payload cipher over the `{ iv, data }` wire envelope.

use std::collections::HashSet;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sealed_chat_node::crypto::{
    generate_nonce, CryptoError, EncryptedEnvelope, PayloadCipher, NONCE_LEN, TAG_LEN,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Payload {
    message: String,
    count: u32,
}

fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

#[test]
fn test_roundtrip() {
    let cipher = PayloadCipher::new(random_key());
    let payload = Payload {
        message: "hello over the sealed transport".to_string(),
        count: 42,
    };
    let plaintext = serde_json::to_vec(&payload).unwrap();

    let envelope = cipher.encrypt_payload(&plaintext).unwrap();
    let decrypted = cipher.decrypt_payload(&envelope).unwrap();

    let recovered: Payload = serde_json::from_slice(&decrypted).unwrap();
    assert_eq!(recovered, payload);
}

/// An empty plaintext seals to a tag-only envelope, which inbound
/// validation treats as malformed: data must be strictly longer than
/// the tag.
#[test]
fn test_empty_payload_envelope_rejected_inbound() {
    let cipher = PayloadCipher::new(random_key());
    let envelope = cipher.encrypt_payload(b"").unwrap();
    assert_eq!(BASE64.decode(&envelope.data).unwrap().len(), TAG_LEN);
    assert!(matches!(
        cipher.decrypt_payload(&envelope),
        Err(CryptoError::DecryptionFailed)
    ));
}

#[test]
fn test_envelope_shape() {
    let cipher = PayloadCipher::new(random_key());
    let envelope = cipher.encrypt_payload(b"shape check").unwrap();

    let nonce = BASE64.decode(&envelope.iv).unwrap();
    let combined = BASE64.decode(&envelope.data).unwrap();
    assert_eq!(nonce.len(), NONCE_LEN);
    // ciphertext length == plaintext length for GCM, tag appended
    assert_eq!(combined.len(), b"shape check".len() + TAG_LEN);
}

/// Flipping any single bit in the ciphertext, the tag, or the nonce must
/// fail decryption, never yield a wrong-but-parseable plaintext.
#[test]
fn test_tamper_detection() {
    let key = random_key();
    let cipher = PayloadCipher::new(key);
    let envelope = cipher.encrypt_payload(b"tamper target payload").unwrap();

    let nonce = BASE64.decode(&envelope.iv).unwrap();
    let combined = BASE64.decode(&envelope.data).unwrap();

    // Every byte of ciphertext||tag
    for index in 0..combined.len() {
        let mut corrupted = combined.clone();
        corrupted[index] ^= 0x01;
        let tampered = EncryptedEnvelope {
            iv: envelope.iv.clone(),
            data: BASE64.encode(&corrupted),
        };
        assert!(
            matches!(
                cipher.decrypt_payload(&tampered),
                Err(CryptoError::DecryptionFailed)
            ),
            "bit flip at data byte {} was not detected",
            index
        );
    }

    // Every byte of the nonce
    for index in 0..nonce.len() {
        let mut corrupted = nonce.clone();
        corrupted[index] ^= 0x01;
        let tampered = EncryptedEnvelope {
            iv: BASE64.encode(&corrupted),
            data: envelope.data.clone(),
        };
        assert!(
            matches!(
                cipher.decrypt_payload(&tampered),
                Err(CryptoError::DecryptionFailed)
            ),
            "bit flip at nonce byte {} was not detected",
            index
        );
    }
}

#[test]
fn test_wrong_key_rejected() {
    let cipher = PayloadCipher::new(random_key());
    let other = PayloadCipher::new(random_key());

    let envelope = cipher.encrypt_payload(b"for the right key only").unwrap();
    assert!(other.decrypt_payload(&envelope).is_err());
}

#[test]
fn test_short_payload_rejected() {
    let cipher = PayloadCipher::new(random_key());

    // data no longer than the tag is structurally malformed
    for len in 0..=TAG_LEN {
        let envelope = EncryptedEnvelope {
            iv: BASE64.encode([0u8; NONCE_LEN]),
            data: BASE64.encode(vec![0u8; len]),
        };
        assert!(cipher.decrypt_payload(&envelope).is_err(), "len {}", len);
    }
}

#[test]
fn test_undecodable_envelope_rejected() {
    let cipher = PayloadCipher::new(random_key());

    let bad_iv = EncryptedEnvelope {
        iv: "not base64 !!!".to_string(),
        data: BASE64.encode([0u8; 32]),
    };
    assert!(cipher.decrypt_payload(&bad_iv).is_err());

    let bad_data = EncryptedEnvelope {
        iv: BASE64.encode([0u8; NONCE_LEN]),
        data: "also not base64 !!!".to_string(),
    };
    assert!(cipher.decrypt_payload(&bad_data).is_err());
}

#[test]
fn test_wrong_nonce_length_rejected() {
    let cipher = PayloadCipher::new(random_key());
    let envelope = cipher.encrypt_payload(b"payload").unwrap();

    let short_iv = EncryptedEnvelope {
        iv: BASE64.encode([0u8; 8]),
        data: envelope.data.clone(),
    };
    assert!(cipher.decrypt_payload(&short_iv).is_err());
}

/// Sampled nonces never collide at volumes far beyond what this node
/// encrypts in practice.
#[test]
fn test_nonce_uniqueness() {
    let mut seen = HashSet::with_capacity(1_000_000);
    for _ in 0..1_000_000 {
        assert!(seen.insert(generate_nonce()), "nonce collision");
    }
}

#[test]
fn test_envelopes_use_fresh_nonces() {
    let cipher = PayloadCipher::new(random_key());
    let mut seen = HashSet::new();
    for _ in 0..1_000 {
        let envelope = cipher.encrypt_payload(b"same plaintext").unwrap();
        assert!(seen.insert(envelope.iv.clone()), "nonce reuse on the wire");
    }
}
