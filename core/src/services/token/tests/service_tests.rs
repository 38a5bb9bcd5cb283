//! Unit tests for token codec

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::domain::entities::token::{bearer, EXPIRATION_TIME_MS};
use crate::domain::entities::user::{USER_CREATE, USER_READ, USER_UPDATE};
use crate::errors::{DomainError, InvalidTokenReason, TokenError, ValidationError};
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{TokenCodec, TokenCodecConfig};

const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs512";

fn create_codec() -> (TokenCodec, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    let codec = TokenCodec::with_clock(TokenCodecConfig::with_secret(SECRET), clock.clone());
    (codec, clock)
}

fn admin_authorities() -> Vec<String> {
    vec![
        USER_READ.to_string(),
        USER_CREATE.to_string(),
        USER_UPDATE.to_string(),
    ]
}

fn assert_invalid(result: Result<impl std::fmt::Debug, DomainError>, expected: InvalidTokenReason) {
    match result {
        Err(DomainError::Token(TokenError::InvalidToken(reason))) => assert_eq!(reason, expected),
        other => panic!("expected InvalidToken({:?}), got {:?}", expected, other),
    }
}

/// Signs an arbitrary claim payload with the test secret
fn sign_raw(payload: serde_json::Value, algorithm: Algorithm) -> String {
    encode(
        &Header::new(algorithm),
        &payload,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn full_payload(now_ms: i64) -> serde_json::Value {
    json!({
        "sub": "alice",
        "authorities": ["user:read"],
        "iss": "Energosoft ITSS",
        "aud": "User Management Portal",
        "issuedAt": now_ms,
        "expiresAt": now_ms + EXPIRATION_TIME_MS,
    })
}

#[test]
fn test_issue_then_verify_returns_subject_and_authorities() {
    let (codec, clock) = create_codec();
    let issued_at = clock.now_millis();

    let token = codec.issue("alice", &admin_authorities()).unwrap();
    let claims = codec.verify(&token).unwrap();

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.authorities, admin_authorities());
    assert_eq!(claims.iss, "Energosoft ITSS");
    assert_eq!(claims.aud, "User Management Portal");
    assert_eq!(claims.issued_at, issued_at);
    assert_eq!(claims.expires_at - claims.issued_at, EXPIRATION_TIME_MS);
}

#[test]
fn test_issue_with_empty_authorities() {
    let (codec, _) = create_codec();

    let token = codec.issue("bob", &[]).unwrap();
    let claims = codec.verify(&token).unwrap();

    assert_eq!(claims.sub, "bob");
    assert!(claims.authorities.is_empty());
}

#[test]
fn test_issue_rejects_blank_subject() {
    let (codec, _) = create_codec();

    for subject in ["", "   "] {
        let result = codec.issue(subject, &admin_authorities());
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::RequiredField { .. }))
        ));
    }
}

#[test]
fn test_token_uses_hs512_header() {
    let (codec, _) = create_codec();
    let token = codec.issue("alice", &[]).unwrap();

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS512);
}

#[test]
fn test_verify_rejects_any_modified_signature_byte() {
    let (codec, _) = create_codec();
    let token = codec.issue("alice", &admin_authorities()).unwrap();

    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let signature_bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();

    for index in 0..signature_bytes.len() {
        let mut tampered = signature_bytes.clone();
        tampered[index] ^= 0x01;
        let tampered_token = format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(&tampered));

        assert_invalid(codec.verify(&tampered_token), InvalidTokenReason::BadSignature);
    }
}

#[test]
fn test_verify_rejects_modified_payload() {
    let (codec, clock) = create_codec();
    let token = codec.issue("alice", &[USER_READ.to_string()]).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let mut forged = full_payload(clock.now_millis());
    forged["authorities"] = json!(["user:read", "user:delete"]);
    let forged_payload = URL_SAFE_NO_PAD.encode(forged.to_string());
    let forged_token = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    assert_invalid(codec.verify(&forged_token), InvalidTokenReason::BadSignature);
}

#[test]
fn test_verify_rejects_token_signed_with_other_secret() {
    let (codec, clock) = create_codec();
    let other = TokenCodec::with_clock(
        TokenCodecConfig::with_secret("another-secret-entirely"),
        clock,
    );

    let token = other.issue("alice", &[]).unwrap();
    assert_invalid(codec.verify(&token), InvalidTokenReason::BadSignature);
}

#[test]
fn test_verify_accepts_until_expiry_and_rejects_after() {
    let (codec, clock) = create_codec();
    let token = codec.issue("alice", &[]).unwrap();

    clock.advance(Duration::milliseconds(EXPIRATION_TIME_MS));
    assert!(codec.verify(&token).is_ok());

    clock.advance(Duration::milliseconds(1));
    assert_invalid(codec.verify(&token), InvalidTokenReason::Expired);
}

#[test]
fn test_verify_rejects_after_five_days() {
    let (codec, clock) = create_codec();
    let token = codec.issue("alice", &admin_authorities()).unwrap();

    clock.advance(Duration::days(5) + Duration::seconds(1));
    assert_invalid(codec.verify(&token), InvalidTokenReason::Expired);
}

#[test]
fn test_verify_rejects_unsigned_token() {
    let (codec, clock) = create_codec();

    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(full_payload(clock.now_millis()).to_string());

    for token in [
        format!("{}.{}.", header, payload),
        format!("{}.{}", header, payload),
    ] {
        let result = codec.verify(&token);
        assert!(result.is_err(), "unsigned token must never verify");
        assert!(result.unwrap_err().is_invalid_token());
    }
}

#[test]
fn test_verify_rejects_other_hmac_algorithm() {
    let (codec, clock) = create_codec();
    let token = sign_raw(full_payload(clock.now_millis()), Algorithm::HS256);

    assert_invalid(codec.verify(&token), InvalidTokenReason::BadSignature);
}

#[test]
fn test_verify_reports_missing_claim() {
    let (codec, clock) = create_codec();

    for claim in ["sub", "authorities", "iss", "aud", "issuedAt", "expiresAt"] {
        let mut payload = full_payload(clock.now_millis());
        payload.as_object_mut().unwrap().remove(claim);
        let token = sign_raw(payload, Algorithm::HS512);

        assert_invalid(codec.verify(&token), InvalidTokenReason::MissingClaim(claim));
    }
}

#[test]
fn test_verify_rejects_blank_subject_claim() {
    let (codec, clock) = create_codec();
    let mut payload = full_payload(clock.now_millis());
    payload["sub"] = json!("  ");

    let token = sign_raw(payload, Algorithm::HS512);
    assert_invalid(codec.verify(&token), InvalidTokenReason::MissingClaim("sub"));
}

#[test]
fn test_verify_rejects_wrong_issuer_and_audience() {
    let (codec, clock) = create_codec();

    let mut payload = full_payload(clock.now_millis());
    payload["iss"] = json!("Someone Else");
    assert_invalid(
        codec.verify(&sign_raw(payload, Algorithm::HS512)),
        InvalidTokenReason::WrongIssuer,
    );

    let mut payload = full_payload(clock.now_millis());
    payload["aud"] = json!("Another Portal");
    assert_invalid(
        codec.verify(&sign_raw(payload, Algorithm::HS512)),
        InvalidTokenReason::WrongAudience,
    );
}

#[test]
fn test_verify_rejects_garbage() {
    let (codec, _) = create_codec();

    for token in ["", "not-a-token", "a.b.c", "...."] {
        let result = codec.verify(token);
        assert!(result.unwrap_err().is_invalid_token());
    }
}

#[test]
fn test_verify_bearer_requires_prefix() {
    let (codec, _) = create_codec();
    let token = codec.issue("alice", &admin_authorities()).unwrap();

    let claims = codec.verify_bearer(&bearer(&token)).unwrap();
    assert_eq!(claims.sub, "alice");

    assert_invalid(codec.verify_bearer(&token), InvalidTokenReason::MissingBearerPrefix);
    assert_invalid(
        codec.verify_bearer(&format!("bearer {}", token)),
        InvalidTokenReason::MissingBearerPrefix,
    );
}
