use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::TokenError;
use crate::config::AuthConfig;
use crate::config::AuthConfigError;

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;

/// Default refresh token lifetime in days.
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

/// Token issuer and verifier for stateless authentication.
///
/// Mints signed, typed, expiring tokens and validates them without any
/// server-side session state: every validity fact is recomputable from the
/// token bytes plus the signing key held here.
///
/// The clock is always a caller-supplied Unix timestamp, so decode results
/// are deterministic for a given token and instant.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// Access/refresh token pair minted at login.
///
/// Both tokens carry the same subject and issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// HTTP auth scheme discriminator, always "bearer".
    pub token_type: &'static str,
}

impl TokenIssuer {
    /// Create a new token issuer with a secret key.
    ///
    /// Uses HS256 and the default token lifetimes. The secret should be at
    /// least 256 bits (32 bytes) for HS256 and never checked into code.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::minutes(DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    /// Create a token issuer from validated configuration.
    ///
    /// # Errors
    /// * `AuthConfigError::UnsupportedAlgorithm` - Algorithm is not in the HMAC family
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthConfigError> {
        let secret = config.jwt_secret_key.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: config.algorithm()?,
            access_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_ttl: Duration::days(config.refresh_token_expire_days),
        })
    }

    /// Mint an access token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `now` - Current Unix timestamp, becomes the `iat` claim
    /// * `ttl_override` - Optional lifetime replacing the configured default
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue_access(
        &self,
        subject: &str,
        now: i64,
        ttl_override: Option<Duration>,
    ) -> Result<String, TokenError> {
        let ttl = ttl_override.unwrap_or(self.access_ttl);
        self.issue(subject, TokenKind::Access, now, ttl)
    }

    /// Mint a refresh token for a subject.
    ///
    /// The refresh lifetime is fixed policy and cannot be overridden per
    /// call.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue_refresh(&self, subject: &str, now: i64) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Refresh, now, self.refresh_ttl)
    }

    /// Mint an access/refresh pair sharing the same issuance time.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue_pair(&self, subject: &str, now: i64) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(subject, now, None)?,
            refresh_token: self.issue_refresh(subject, now)?,
            token_type: "bearer",
        })
    }

    fn issue(
        &self,
        subject: &str,
        kind: TokenKind,
        now: i64,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, kind, now, now + ttl.num_seconds());
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token at the given instant.
    ///
    /// The signature is verified first, then expiry is checked against the
    /// caller-supplied clock. The expiry boundary counts as expired.
    ///
    /// # Arguments
    /// * `token` - Compact token string to decode
    /// * `now` - Current Unix timestamp
    ///
    /// # Returns
    /// The reconstructed claims
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch, covers tampering and a rotated key
    /// * `Expired` - `now` is at or past the `exp` claim
    /// * `Malformed` - Token structure or payload cannot be parsed
    pub fn decode(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller clock, boundary inclusive.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Check that a token is valid and of the expected kind.
    ///
    /// Returns `false` on any decode failure and on a kind mismatch, never
    /// an error. This is the primitive that keeps refresh tokens out of
    /// request authentication and access tokens out of the refresh flow.
    pub fn verify_kind(&self, token: &str, expected: TokenKind, now: i64) -> bool {
        match self.decode(token, now) {
            Ok(claims) => claims.kind == expected,
            Err(_) => false,
        }
    }

    /// Expiry instant of a token that currently decodes, `None` otherwise.
    pub fn expiration(&self, token: &str, now: i64) -> Option<DateTime<Utc>> {
        let claims = self.decode(token, now).ok()?;
        DateTime::from_timestamp(claims.exp, 0)
    }
}
