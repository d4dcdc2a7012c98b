/// User endpoints
///
/// This module provides account management endpoints:
/// - Signup
/// - Login
///
/// # Endpoints
///
/// - `POST /api/v1/user/signup` - Create a new account
/// - `POST /api/v1/user/login` - Authenticate and get a session token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use clickscribe_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login name
    #[validate(length(min = 3, message = "Username must be at least 3 characters long."))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email address."))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 6, message = "Password must be at least 6 characters long."))]
    pub password: String,
}

/// Signup response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Confirmation message
    pub message: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 3, message = "Username must be at least 3 characters long."))]
    pub username: String,

    /// Plaintext password
    #[validate(length(min = 6, message = "Password must be at least 6 characters long."))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Confirmation message
    pub message: String,

    /// Session token (24h, HS256)
    pub token: String,
}

/// Signup endpoint
///
/// Creates a new user account. The password is hashed with Argon2id before
/// it reaches the database.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/user/signup
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "hunter22"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed (per-field details in the body)
/// - `409 Conflict`: Username or email already taken
/// - `500 Internal Server Error`: Server error
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    req.validate()?;

    // Reject duplicates before doing the (expensive) password hash
    let existing = User::find_by_username_or_email(&state.db, &req.username, &req.email).await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "user created");

    Ok(Json(SignupResponse {
        message: "User Successfully Created".to_string(),
    }))
}

/// Login endpoint
///
/// Authenticates a user and returns a session JWT.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/user/login
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "hunter22"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Successfully Logged In",
///   "token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or unknown username
/// - `401 Unauthorized`: Wrong password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::BadRequest("User not found!".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Incorrect Password".to_string()));
    }

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        message: "Successfully Logged In".to_string(),
        token,
    }))
}
