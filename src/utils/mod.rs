//! Shared utilities used throughout the application:
//!
//! - [`errors`]: Application error types and the error envelope contract
//! - [`jwt`]: JWT token creation and verification
//! - [`pagination`]: Request pagination utilities
//! - [`password`]: Password hashing and verification
//! - [`redact`]: Sensitive-field redaction for logged request bodies

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod redact;
