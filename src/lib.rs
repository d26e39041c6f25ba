//! Authentication core for the notes API.
//!
//! Provides the credential and session-token management the HTTP layer
//! builds on:
//! - Password hashing (bcrypt, self-describing hash strings)
//! - Signed, typed, expiring access/refresh tokens (JWT, HMAC family)
//! - Opaque secret generation (reset tokens, API keys, verification codes)
//!
//! Routing, schema validation and persistence live elsewhere and consume
//! this crate through [`Authenticator`], or through the [`PasswordHasher`]
//! and [`TokenIssuer`] building blocks directly. All operations are pure
//! and synchronous; the only process-wide state is the immutable
//! configuration loaded once at startup via [`AuthConfig::load`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use notes_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use notes_auth::{TokenIssuer, TokenKind};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let now = 1_700_000_000;
//! let token = issuer.issue_access("alice", now, None).unwrap();
//!
//! let claims = issuer.decode(&token, now).unwrap();
//! assert_eq!(claims.sub, "alice");
//! assert!(issuer.verify_kind(&token, TokenKind::Access, now));
//! assert!(!issuer.verify_kind(&token, TokenKind::Refresh, now));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use notes_auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash the password, persist it elsewhere
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint an access/refresh pair
//! let now = 1_700_000_000;
//! let pair = auth.login("password123", &hash, "alice", now).unwrap();
//!
//! // Per-request: validate the bearer token
//! let claims = auth.authorize(&pair.access_token, now).unwrap();
//! assert_eq!(claims.sub, "alice");
//!
//! // Later: trade the refresh token for a fresh access token
//! let renewed = auth.refresh(&pair.refresh_token, now + 60).unwrap();
//! assert!(auth.authorize(&renewed, now + 60).is_ok());
//! ```

pub mod authenticator;
pub mod config;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::AuthConfigError;
pub use password::random::generate_api_key;
pub use password::random::generate_reset_token;
pub use password::random::generate_verification_code;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenKind;
pub use token::TokenPair;
