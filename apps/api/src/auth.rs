//! JWT and password authentication module.
//!
//! Handles token generation and validation, and argon2 password hashing.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use sweetify_core::Role;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Role at issue time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager (HS256).
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        JwtManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }

    /// Generate a token for a user.
    pub fn issue(&self, user_id: &str, role: Role) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token (signature and expiry).
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &Validation::default()).map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                ApiError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Passwords
// =============================================================================

/// Hash a password for storage (PHC string, random salt).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
///
/// A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret", 3600);

        let token = manager.issue("user-001", Role::Admin).unwrap();
        let claims = manager.validate(&token).unwrap();

        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);

        let token = issuer.issue("user-001", Role::Customer).unwrap();
        assert!(matches!(
            verifier.validate(&token),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the default 60s leeway
        let manager = JwtManager::new("test-secret", -3600);
        let token = manager.issue("user-001", Role::Customer).unwrap();
        assert!(manager.validate(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-hash"));
    }
}
