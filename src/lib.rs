//! # PUIUX Click API
//!
//! Backend for PUIUX Click, a SaaS product that lets a business owner
//! generate a small marketing website through a conversational wizard.
//!
//! ## Overview
//!
//! - **Authentication**: JWT sessions with a 15-minute access token, issued
//!   simultaneously into the response body and an `accessToken` cookie
//! - **Sites**: CRUD persistence for generated sites, owner-scoped
//! - **Generation**: call-through to an AI provider that drafts site copy
//! - **Pipeline**: every request flows through the route guard, request
//!   logging (with sensitive-field redaction), and exception normalization
//!   into a uniform error envelope
//!
//! ## Architecture
//!
//! The codebase follows a modular layout inspired by NestJS:
//!
//! ```text
//! src/
//! ├── config/           # Env-based configuration (JWT, database, CORS, AI)
//! ├── middleware/       # Route guard, auth extractor, error envelope
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sessions (register, login, refresh, logout, me)
//! │   ├── sites/       # Site persistence
//! │   └── generate/    # AI draft generation
//! └── utils/           # Errors, JWT, password hashing, redaction
//! ```
//!
//! Each feature module follows a consistent structure: `controller.rs`
//! (HTTP handlers), `service.rs` (business logic), `model.rs` (DTOs and
//! database structs), `router.rs` (axum router configuration).
//!
//! ## Error contract
//!
//! Every failed request answers with one envelope shape:
//!
//! ```json
//! {
//!   "statusCode": 422,
//!   "timestamp": "2025-03-01T10:15:00.000Z",
//!   "path": "/api/auth/register",
//!   "method": "POST",
//!   "message": ["البريد الإلكتروني غير صالح"]
//! }
//! ```
//!
//! `stack` is appended outside production only.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
