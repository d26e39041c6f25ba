use config::Config as ConfigBuilder;
use config::Environment;
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use thiserror::Error;

use crate::password::bcrypt::MAX_COST;
use crate::password::bcrypt::MIN_COST;
use crate::token::issuer::DEFAULT_ACCESS_TTL_MINUTES;
use crate::token::issuer::DEFAULT_REFRESH_TTL_DAYS;

/// Authentication configuration.
///
/// Loaded once at process start and immutable afterwards; the hasher and
/// the token issuer are constructed from it and never consult it again.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret for token signatures. Empty or missing is fatal.
    pub jwt_secret_key: String,

    /// Signature scheme, HMAC family only.
    pub jwt_algorithm: String,

    /// Access token lifetime in minutes.
    pub access_token_expire_minutes: i64,

    /// Refresh token lifetime in days.
    pub refresh_token_expire_days: i64,

    /// bcrypt work factor (log2 rounds).
    pub bcrypt_rounds: u32,
}

/// Configuration loading and validation errors.
///
/// All of these are fatal at startup: the process must not serve requests
/// without a valid signing key and work factor.
#[derive(Debug, Error)]
pub enum AuthConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("JWT_SECRET_KEY must be set to a non-empty value")]
    MissingSigningKey,

    #[error("Unsupported JWT algorithm '{0}', expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(String),

    #[error("BCRYPT_ROUNDS must be between {MIN_COST} and {MAX_COST}, got {0}")]
    CostFactorOutOfRange(u32),

    #[error("Token lifetimes must be positive")]
    NonPositiveLifetime,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// * `JWT_SECRET_KEY` - Signing key, required and non-empty
    /// * `JWT_ALGORITHM` - Signature scheme, defaults to HS256
    /// * `ACCESS_TOKEN_EXPIRE_MINUTES` - Defaults to 30
    /// * `REFRESH_TOKEN_EXPIRE_DAYS` - Defaults to 7
    /// * `BCRYPT_ROUNDS` - Defaults to 12
    ///
    /// # Errors
    /// Returns `AuthConfigError` if loading fails or any value is invalid;
    /// callers are expected to abort startup on error.
    pub fn load() -> Result<Self, AuthConfigError> {
        let configuration = ConfigBuilder::builder()
            .set_default("jwt_secret_key", "")?
            .set_default("jwt_algorithm", "HS256")?
            .set_default("access_token_expire_minutes", DEFAULT_ACCESS_TTL_MINUTES)?
            .set_default("refresh_token_expire_days", DEFAULT_REFRESH_TTL_DAYS)?
            .set_default("bcrypt_rounds", i64::from(bcrypt::DEFAULT_COST))?
            .add_source(Environment::default())
            .build()?;

        let loaded: Self = configuration.try_deserialize()?;
        loaded.validate()?;

        if loaded.jwt_secret_key.len() < 32 {
            tracing::warn!(
                key_bytes = loaded.jwt_secret_key.len(),
                "JWT signing key is shorter than 32 bytes; HS256 expects at least 256 bits"
            );
        }

        Ok(loaded)
    }

    /// Parsed signature algorithm.
    ///
    /// Restricted to the HMAC family: the signing key is a shared secret,
    /// not an asymmetric key pair.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured scheme is not HS256/HS384/HS512
    pub fn algorithm(&self) -> Result<Algorithm, AuthConfigError> {
        match self.jwt_algorithm.as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(AuthConfigError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    fn validate(&self) -> Result<(), AuthConfigError> {
        if self.jwt_secret_key.trim().is_empty() {
            return Err(AuthConfigError::MissingSigningKey);
        }

        self.algorithm()?;

        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_rounds) {
            return Err(AuthConfigError::CostFactorOutOfRange(self.bcrypt_rounds));
        }

        if self.access_token_expire_minutes <= 0 || self.refresh_token_expire_days <= 0 {
            return Err(AuthConfigError::NonPositiveLifetime);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            jwt_secret_key: "test_secret_key_at_least_32_bytes!".to_string(),
            jwt_algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
            bcrypt_rounds: 12,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_signing_key_is_rejected() {
        let mut config = valid_config();
        config.jwt_secret_key = "".to_string();
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::MissingSigningKey)
        ));

        config.jwt_secret_key = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::MissingSigningKey)
        ));
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        let mut config = valid_config();
        config.jwt_algorithm = "RS256".to_string();
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_cost_factor_bounds() {
        let mut config = valid_config();

        config.bcrypt_rounds = MIN_COST - 1;
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::CostFactorOutOfRange(_))
        ));

        config.bcrypt_rounds = MAX_COST + 1;
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::CostFactorOutOfRange(_))
        ));

        config.bcrypt_rounds = MIN_COST;
        assert!(config.validate().is_ok());
        config.bcrypt_rounds = MAX_COST;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_lifetimes_are_rejected() {
        let mut config = valid_config();
        config.access_token_expire_minutes = 0;
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::NonPositiveLifetime)
        ));

        let mut config = valid_config();
        config.refresh_token_expire_days = -1;
        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::NonPositiveLifetime)
        ));
    }

    #[test]
    fn test_load_from_environment() {
        // A single test mutates the process environment so parallel test
        // threads never observe each other's overrides.
        env::remove_var("JWT_SECRET_KEY");
        assert!(matches!(
            AuthConfig::load(),
            Err(AuthConfigError::MissingSigningKey)
        ));

        env::set_var("JWT_SECRET_KEY", "test_secret_key_at_least_32_bytes!");
        env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "15");
        let config = AuthConfig::load().expect("Failed to load configuration");
        assert_eq!(config.jwt_algorithm, "HS256");
        assert_eq!(config.access_token_expire_minutes, 15);
        assert_eq!(config.refresh_token_expire_days, 7);
        assert_eq!(config.bcrypt_rounds, 12);

        env::set_var("JWT_SECRET_KEY", "");
        assert!(matches!(
            AuthConfig::load(),
            Err(AuthConfigError::MissingSigningKey)
        ));

        env::remove_var("JWT_SECRET_KEY");
        env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
    }
}
