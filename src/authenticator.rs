use crate::config::AuthConfig;
use crate::config::AuthConfigError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenError;
use crate::token::TokenIssuer;
use crate::token::TokenKind;
use crate::token::TokenPair;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// HTTP handlers consume this one type for the registration, login,
/// per-request and refresh flows instead of wiring the hasher and issuer
/// together themselves.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Wrong password, or a token rejected for any reason. The reason is
    /// deliberately not distinguished, so callers cannot leak it.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with default lifetimes and work factor.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    pub fn new(secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret),
        }
    }

    /// Create an authenticator from validated configuration.
    ///
    /// # Errors
    /// * `AuthConfigError` - Configuration holds an unsupported algorithm
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthConfigError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_cost(config.bcrypt_rounds),
            token_issuer: TokenIssuer::from_config(config)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password is empty or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the tokens assert
    /// * `now` - Current Unix timestamp
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token issuance failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: i64,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue_pair(subject, now)?)
    }

    /// Validate a bearer token for request authentication.
    ///
    /// Only unexpired access tokens pass. Every rejection reason collapses
    /// into `InvalidCredentials`; the detail is traced at debug level only.
    pub fn authorize(&self, token: &str, now: i64) -> Result<Claims, AuthenticationError> {
        match self.token_issuer.decode(token, now) {
            Ok(claims) if claims.kind == TokenKind::Access => Ok(claims),
            Ok(claims) => {
                tracing::debug!(kind = %claims.kind, "Rejected token of wrong kind");
                Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }

    /// Trade an unexpired refresh token for a new access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token invalid, expired, or not a refresh token
    /// * `Token` - Issuance of the new access token failed
    pub fn refresh(&self, refresh_token: &str, now: i64) -> Result<String, AuthenticationError> {
        match self.token_issuer.decode(refresh_token, now) {
            Ok(claims) if claims.kind == TokenKind::Refresh => {
                Ok(self.token_issuer.issue_access(&claims.sub, now, None)?)
            }
            Ok(claims) => {
                tracing::debug!(kind = %claims.kind, "Rejected token of wrong kind");
                Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected refresh token");
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_000;

    fn authenticator() -> Authenticator {
        let config = AuthConfig {
            jwt_secret_key: "test_secret_key_at_least_32_bytes!".to_string(),
            jwt_algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
            bcrypt_rounds: 4,
        };
        Authenticator::from_config(&config).expect("Failed to build authenticator")
    }

    #[test]
    fn test_login_success() {
        let auth = authenticator();
        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");

        let pair = auth
            .login("my_password", &hash, "alice", NOW)
            .expect("Login failed");

        let claims = auth
            .authorize(&pair.access_token, NOW)
            .expect("Authorization failed");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_login_wrong_password() {
        let auth = authenticator();
        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = auth.login("wrong_password", &hash, "alice", NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authorize_rejects_refresh_token() {
        let auth = authenticator();
        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");
        let pair = auth
            .login("my_password", &hash, "alice", NOW)
            .expect("Login failed");

        let result = auth.authorize(&pair.refresh_token, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authorize_rejects_expired_token() {
        let auth = authenticator();
        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");
        let pair = auth
            .login("my_password", &hash, "alice", NOW)
            .expect("Login failed");

        let expires_at = NOW + 30 * 60;
        assert!(auth.authorize(&pair.access_token, expires_at - 1).is_ok());
        assert!(matches!(
            auth.authorize(&pair.access_token, expires_at),
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authorize_rejects_garbage() {
        let auth = authenticator();
        let result = auth.authorize("invalid.token.here", NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_refresh_mints_usable_access_token() {
        let auth = authenticator();
        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");
        let pair = auth
            .login("my_password", &hash, "alice", NOW)
            .expect("Login failed");

        let later = NOW + 60;
        let renewed = auth
            .refresh(&pair.refresh_token, later)
            .expect("Refresh failed");

        let claims = auth.authorize(&renewed, later).expect("Authorization failed");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iat, later);
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let auth = authenticator();
        let hash = auth
            .hash_password("my_password")
            .expect("Failed to hash password");
        let pair = auth
            .login("my_password", &hash, "alice", NOW)
            .expect("Login failed");

        let result = auth.refresh(&pair.access_token, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }
}
