/// Authentication utilities
///
/// This module provides secure authentication primitives for Clickscribe:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum bearer-token middleware
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with 24 hour expiration
/// - **Constant-time Comparison**: All verification uses constant-time operations
///
/// # Example
///
/// ```no_run
/// use clickscribe_shared::auth::password::{hash_password, verify_password};
/// use clickscribe_shared::auth::jwt::{create_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // JWT token generation
/// let claims = Claims::new(Uuid::new_v4());
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
