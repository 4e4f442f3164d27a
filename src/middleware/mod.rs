//! Cross-cutting request middleware.
//!
//! - [`auth`]: Access-token extractor and best-effort identity lookup
//! - [`error_envelope`]: Normalizes every failure into one envelope body
//! - [`route_guard`]: Cookie-presence route guard for page navigation
//!
//! Layer order (outermost first): route guard → CORS → request logging →
//! error envelope → handlers. The guard mirrors the edge middleware of the
//! front end and runs before anything is logged; the envelope runs inside
//! the logger so the logger still observes the normalized failure.

pub mod auth;
pub mod error_envelope;
pub mod route_guard;
