/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness and database connectivity check
/// - `users`: Signup and login endpoints
/// - `pages`: Page creation and retrieval endpoints

pub mod health;
pub mod pages;
pub mod users;
