//! Bearer token issuing and verification

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::token::{Claims, TOKEN_PREFIX};
use crate::errors::{DomainError, DomainResult, InvalidTokenReason, TokenError, ValidationError};
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenCodecConfig;

/// The only algorithm ever accepted.
///
/// `Validation` carries this single algorithm, and `Algorithm` has no
/// unsigned variant, so a header announcing `none` fails to parse before any
/// claim is read.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS512;

/// Claim set as read off the wire, before required claims are checked
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    authorities: Option<Vec<String>>,
    iss: Option<String>,
    aud: Option<String>,
    #[serde(rename = "issuedAt")]
    issued_at: Option<i64>,
    #[serde(rename = "expiresAt")]
    expires_at: Option<i64>,
}

impl RawClaims {
    fn into_claims(self) -> Result<Claims, InvalidTokenReason> {
        let sub = self
            .sub
            .filter(|s| !s.trim().is_empty())
            .ok_or(InvalidTokenReason::MissingClaim("sub"))?;
        Ok(Claims {
            sub,
            authorities: self
                .authorities
                .ok_or(InvalidTokenReason::MissingClaim("authorities"))?,
            iss: self.iss.ok_or(InvalidTokenReason::MissingClaim("iss"))?,
            aud: self.aud.ok_or(InvalidTokenReason::MissingClaim("aud"))?,
            issued_at: self
                .issued_at
                .ok_or(InvalidTokenReason::MissingClaim("issuedAt"))?,
            expires_at: self
                .expires_at
                .ok_or(InvalidTokenReason::MissingClaim("expiresAt"))?,
        })
    }
}

/// Issues and verifies signed bearer tokens
///
/// The signing secret is fixed at construction and never mutated, so a
/// single codec can be shared across request handlers without locking.
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec driven by the wall clock
    pub fn new(config: TokenCodecConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a codec with an explicit time source
    pub fn with_clock(config: TokenCodecConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry, issuer and audience are checked against our own
        // millisecond claims after decoding.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Token lifetime in milliseconds
    pub fn expiration_ms(&self) -> i64 {
        self.config.expiration_ms
    }

    /// Issues a signed token for `subject` carrying `authorities`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token, without the bearer prefix
    /// * `Err(DomainError)` - Blank subject, or the encoder failed
    pub fn issue(&self, subject: &str, authorities: &[String]) -> DomainResult<String> {
        if subject.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "subject".to_string(),
            }
            .into());
        }

        let claims = Claims::new(
            subject,
            authorities.to_vec(),
            self.config.issuer.as_str(),
            self.config.audience.as_str(),
            self.clock.now_millis(),
            self.config.expiration_ms,
        );

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Verifies a signed token and returns its claims
    ///
    /// Fails with `TokenError::InvalidToken` when the signature does not
    /// match, the claims cannot be parsed, a required claim is missing, the
    /// issuer or audience differ, or the current time is past `expiresAt`.
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let data = decode::<RawClaims>(token.trim(), &self.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        InvalidTokenReason::BadSignature
                    }
                    _ => InvalidTokenReason::Malformed,
                };
                debug!(error = %e, "Token rejected by decoder");
                DomainError::from(reason)
            })?;

        let claims = data.claims.into_claims()?;

        if claims.iss != self.config.issuer {
            return Err(InvalidTokenReason::WrongIssuer.into());
        }
        if claims.aud != self.config.audience {
            return Err(InvalidTokenReason::WrongAudience.into());
        }
        if claims.is_expired_at(self.clock.now_millis()) {
            return Err(InvalidTokenReason::Expired.into());
        }

        Ok(claims)
    }

    /// Verifies a header value of the form `Bearer <token>`
    pub fn verify_bearer(&self, header_value: &str) -> DomainResult<Claims> {
        let token = header_value
            .strip_prefix(TOKEN_PREFIX)
            .ok_or(InvalidTokenReason::MissingBearerPrefix)?;
        self.verify(token)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("expiration_ms", &self.config.expiration_ms)
            .finish_non_exhaustive()
    }
}
