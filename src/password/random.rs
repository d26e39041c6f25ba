//! Opaque secret generation: reset tokens, API keys, verification codes.
//!
//! Everything here draws from the operating system CSPRNG.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::Rng;
use rand::RngCore;

use super::errors::PasswordError;

/// Generate a URL-safe reset token from `byte_length` random bytes.
///
/// # Errors
/// * `InvalidInput` - `byte_length` is zero
pub fn generate_reset_token(byte_length: usize) -> Result<String, PasswordError> {
    let bytes = random_bytes(byte_length)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Generate a hex-encoded API key from `byte_length` random bytes.
///
/// # Errors
/// * `InvalidInput` - `byte_length` is zero
pub fn generate_api_key(byte_length: usize) -> Result<String, PasswordError> {
    let bytes = random_bytes(byte_length)?;
    Ok(hex::encode(bytes))
}

/// Generate a numeric verification code of `digits` decimal digits.
///
/// Each digit is drawn independently and uniformly; a truncated hash would
/// skew the distribution.
///
/// # Errors
/// * `InvalidInput` - `digits` is zero
pub fn generate_verification_code(digits: usize) -> Result<String, PasswordError> {
    if digits == 0 {
        return Err(PasswordError::InvalidInput(
            "length must be positive".to_string(),
        ));
    }

    let mut rng = OsRng;
    Ok((0..digits)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect())
}

fn random_bytes(byte_length: usize) -> Result<Vec<u8>, PasswordError> {
    if byte_length == 0 {
        return Err(PasswordError::InvalidInput(
            "length must be positive".to_string(),
        ));
    }

    let mut bytes = vec![0u8; byte_length];
    OsRng.fill_bytes(&mut bytes);
    Ok(bytes)
}
