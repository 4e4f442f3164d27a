//! Configuration modules, one per concern, each loaded from environment
//! variables via a `from_env()` constructor.
//!
//! - [`ai`]: AI provider endpoint, key, and model
//! - [`cors`]: Allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`environment`]: Production/non-production flag (`APP_ENV`)
//! - [`jwt`]: JWT secret and token lifetimes

pub mod ai;
pub mod cors;
pub mod database;
pub mod environment;
pub mod jwt;
