/// Authentication middleware support for Axum
///
/// This module provides the building blocks for bearer-token authentication:
/// header parsing, token validation, and the `AuthContext` that protected
/// handlers read back out of request extensions.
///
/// The axum middleware function itself lives in the API crate so it can map
/// `AuthError` onto that crate's HTTP error type.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use clickscribe_shared::auth::{jwt, middleware::authenticate};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let token = jwt::create_token(&jwt::Claims::new(Uuid::new_v4()), secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::AUTHORIZATION,
///     HeaderValue::from_str(&format!("Bearer {}", token))?,
/// );
///
/// let ctx = authenticate(&headers, secret)?;
/// println!("Authenticated user {}", ctx.user_id);
/// # Ok(())
/// # }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::validate_token;

/// Error type for authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or one without a Bearer token
    #[error("Bearer token is missing")]
    MissingToken,

    /// Token was present but failed validation
    #[error("Unauthorized")]
    InvalidToken(String),
}

/// Authentication context added to request extensions
///
/// Added to the request after successful authentication. Handlers extract it
/// with Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use clickscribe_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

/// Extracts the bearer token from an Authorization header
///
/// # Errors
///
/// Returns `AuthError::MissingToken` when the header is absent, not valid
/// UTF-8, or does not carry a `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    value
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Validates the bearer token in `headers` and builds an [`AuthContext`]
///
/// # Errors
///
/// - `AuthError::MissingToken` when no bearer token is present
/// - `AuthError::InvalidToken` when the token fails signature, expiry, or
///   issuer checks
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;

    let claims =
        validate_token(token, secret).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(AuthContext {
        user_id: claims.sub,
    })
}
