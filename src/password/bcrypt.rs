use super::errors::PasswordError;

/// Smallest work factor the bcrypt implementation accepts.
pub const MIN_COST: u32 = 4;

/// Largest work factor the bcrypt implementation accepts.
pub const MAX_COST: u32 = 31;

/// Password hashing implementation.
///
/// Uses bcrypt with a configurable log2 work factor. The produced hash
/// string embeds the algorithm tag, cost and salt, so verification needs no
/// out-of-band state.
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a password hasher with the default work factor (12).
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// Valid costs are [`MIN_COST`]..=[`MAX_COST`]; out-of-range values are
    /// rejected at configuration load and fail hashing otherwise.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password securely.
    ///
    /// Generates a fresh random salt on every call, so hashing the same
    /// password twice yields different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Self-describing bcrypt hash string, safe to persist as-is
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::InvalidInput(
                "password must be a non-empty string".to_string(),
            ));
        }

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Digest comparison runs in constant time. A malformed or
    /// algorithm-mismatched hash yields `false`, indistinguishable from a
    /// wrong password, so callers cannot probe the storage format.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
