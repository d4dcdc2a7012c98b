/// JWT token generation and validation module
///
/// This module provides JWT (JSON Web Token) functionality for user sessions.
/// Tokens are signed using HS256 (HMAC-SHA256) and carry the user's identity.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours
/// - **Validation**: Signature, expiration, and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use clickscribe_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// // Create a session token
/// let claims = Claims::new(user_id);
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// // Validate token
/// let validated_claims = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated_claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim embedded in every token
const ISSUER: &str = "clickscribe";

/// Session token lifetime
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims structure
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "clickscribe")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates new claims with the default 24 hour expiration
    ///
    /// # Example
    ///
    /// ```
    /// use clickscribe_shared::auth::jwt::Claims;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::new(Uuid::new_v4());
    /// assert!(!claims.is_expired());
    /// ```
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, Duration::hours(TOKEN_LIFETIME_HOURS))
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 (HMAC-SHA256) with the provided secret.
///
/// # Arguments
///
/// * `claims` - Token claims
/// * `secret` - Secret key for signing (should be at least 32 bytes)
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token creation fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "clickscribe"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// Returns an error if:
/// - Signature is invalid
/// - Token has expired
/// - Issuer doesn't match
/// - Token format is invalid
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id);

        let token = create_token(&claims, SECRET).expect("Token creation should succeed");
        assert!(!token.is_empty());

        let validated = validate_token(&token, SECRET).expect("Validation should succeed");
        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.iss, "clickscribe");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(Uuid::new_v4());
        let token = create_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, "a-completely-different-secret-key!!");
        assert!(result.is_err(), "Wrong secret should fail validation");
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate_token("not.a.token", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::seconds(-120));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Token creation should succeed");
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_claims_lifetime() {
        let claims = Claims::new(Uuid::new_v4());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(claims.nbf, claims.iat);
    }
}
