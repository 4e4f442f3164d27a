//! Exception normalization: every failed request leaves the server as one
//! uniform [`ErrorEnvelope`] JSON body, never a framework default page.
//!
//! Recognized failures ([`crate::utils::errors::AppError`] values built with
//! an explicit status) pass their status and message through. Anything else
//! that surfaces as an error-class response is normalized here. The
//! middleware is terminal: it always produces a response.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use tracing::error;

use crate::logging::SanitizedBody;
use crate::middleware::auth::current_claims;
use crate::state::AppState;
use crate::utils::errors::{ErrorDetail, ErrorEnvelope, ErrorMessage};
use crate::utils::redact::REDACTION_MARKER;

const ANONYMOUS: &str = "Anonymous";

pub async fn error_envelope(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let user = current_claims(req.headers(), &state.jwt_config)
        .map(|claims| claims.email)
        .unwrap_or_else(|| ANONYMOUS.to_string());
    let headers = req.headers().clone();
    // Redacted body stashed by the logging middleware, reused for 500
    // diagnostics so raw secrets never reach a log line from here either.
    let sanitized_body = req
        .extensions()
        .get::<SanitizedBody>()
        .and_then(|body| body.0.clone());

    let response = next.run(req).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let detail = response
        .extensions()
        .get::<ErrorDetail>()
        .cloned()
        .unwrap_or_else(|| ErrorDetail {
            // e.g. a bare 404/405 from the router itself
            message: ErrorMessage::Text(
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
            source: String::new(),
        });

    error!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        user = %user,
        error = %detail.message,
        "Request rejected"
    );

    if status.is_server_error() {
        // Unconditional extra verbosity for the 500 class, to aid debugging
        // of unexpected failures.
        error!(body = %sanitized_body.map(|b| b.to_string()).unwrap_or_default(), "Failing request body");
        error!(query = %query.unwrap_or_default(), "Failing request query");
        error!(headers = ?scrub_headers(&headers), "Failing request headers");
    }

    let stack = (!state.environment.is_production() && !detail.source.is_empty())
        .then_some(detail.source.clone());

    let envelope = ErrorEnvelope {
        status_code: status.as_u16(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        path,
        method,
        message: detail.message.clone(),
        stack,
    };

    let mut normalized = (status, Json(envelope)).into_response();
    // Keep the detail visible to the outer logging middleware.
    normalized.extensions_mut().insert(detail);
    normalized
}

/// Header dump for 500 diagnostics with credential-bearing values masked.
fn scrub_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name == header::AUTHORIZATION || name == header::COOKIE {
                REDACTION_MARKER.to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn scrub_headers_masks_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert(header::COOKIE, HeaderValue::from_static("accessToken=t"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let scrubbed = scrub_headers(&headers);
        for (name, value) in scrubbed {
            if name == "authorization" || name == "cookie" {
                assert_eq!(value, REDACTION_MARKER);
            } else {
                assert_eq!(value, "application/json");
            }
        }
    }
}
