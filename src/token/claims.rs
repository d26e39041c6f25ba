use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Intended use of a token.
///
/// Access tokens are short-lived and presented on every request; refresh
/// tokens are long-lived and accepted only when minting new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by every signed token.
///
/// All timestamps are integer Unix epoch seconds. The kind tag is
/// serialized as the `type` claim on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Intended use of the token
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    /// Create claims for a subject with explicit timestamps.
    pub fn new(subject: impl ToString, kind: TokenKind, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
            kind,
        }
    }

    /// Check whether the token is expired at the given instant.
    ///
    /// The expiry boundary itself counts as expired.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }
}
