//! # Clickscribe Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the Clickscribe API server and supporting tools.
//!
//! ## Module Organization
//!
//! - `models`: Database models for the page/header/subheader/button tree
//! - `auth`: Authentication utilities (password hashing, JWT, middleware)
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Clickscribe shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
