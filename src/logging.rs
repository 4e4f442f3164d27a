//! Request logging middleware and tracing subscriber setup.
//!
//! The middleware wraps the full lifetime of one request: a `request` event
//! on entry (with a redacted copy of a JSON body), then exactly one
//! `response` or `error` event on exit with the elapsed wall-clock time.
//! All per-request state (start instant, correlation id) is allocated fresh,
//! so concurrent requests interleave without coordination.

use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::middleware::auth::current_claims;
use crate::state::AppState;
use crate::utils::errors::ErrorDetail;
use crate::utils::redact::redact_fields;

/// Inbound correlation header. Echoed into log lines only, never into
/// responses.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Bodies above this size are not buffered for logging.
const MAX_LOGGED_BODY_BYTES: u64 = 64 * 1024;

/// Correlation id attached earlier in the pipeline (e.g. by an ingress
/// proxy adapter). The logging middleware reads it but never synthesizes
/// one: a request without an id is simply logged without one.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Redacted copy of the request body, stashed in request extensions so the
/// envelope middleware can reuse it for 500-class diagnostics without
/// re-reading (or re-leaking) the raw body.
#[derive(Debug, Clone)]
pub struct SanitizedBody(pub Option<Value>);

/// One structured log event. Tagged union over the three lifecycle points
/// of a request, sharing the correlation fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LogEvent {
    #[serde(rename_all = "camelCase")]
    Request {
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        method: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },
    #[serde(rename_all = "camelCase")]
    Response {
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        method: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        status: u16,
        duration_ms: u64,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        method: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        duration_ms: u64,
        message: String,
    },
}

impl LogEvent {
    pub fn emit(&self) {
        match self {
            Self::Request {
                request_id,
                method,
                url,
                user_id,
                body,
            } => info!(
                target: "http",
                request_id = request_id.as_deref().unwrap_or(""),
                method = %method,
                url = %url,
                user_id = user_id.as_deref().unwrap_or(""),
                body = %body.as_ref().map(serde_json::Value::to_string).unwrap_or_default(),
                "Incoming request"
            ),
            Self::Response {
                request_id,
                method,
                url,
                user_id,
                status,
                duration_ms,
            } => info!(
                target: "http",
                request_id = request_id.as_deref().unwrap_or(""),
                method = %method,
                url = %url,
                user_id = user_id.as_deref().unwrap_or(""),
                status = %status,
                duration_ms = %duration_ms,
                "Request completed"
            ),
            Self::Error {
                request_id,
                method,
                url,
                user_id,
                duration_ms,
                message,
            } => error!(
                target: "http",
                request_id = request_id.as_deref().unwrap_or(""),
                method = %method,
                url = %url,
                user_id = user_id.as_deref().unwrap_or(""),
                duration_ms = %duration_ms,
                error = %message,
                "Request failed"
            ),
        }
    }
}

pub async fn logging_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let url = req.uri().to_string();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.extensions().get::<RequestId>().map(|id| id.0.clone()));

    let user_id = current_claims(req.headers(), &state.jwt_config).map(|claims| claims.sub);

    let (req, sanitized) = buffer_and_redact(req).await;

    LogEvent::Request {
        request_id: request_id.clone(),
        method: method.clone(),
        url: url.clone(),
        user_id: user_id.clone(),
        body: sanitized,
    }
    .emit();

    let response = next.run(req).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match response.extensions().get::<ErrorDetail>() {
        Some(detail) => LogEvent::Error {
            request_id,
            method,
            url,
            user_id,
            duration_ms,
            message: detail.message.to_string(),
        }
        .emit(),
        None => LogEvent::Response {
            request_id,
            method,
            url,
            user_id,
            status: response.status().as_u16(),
            duration_ms,
        }
        .emit(),
    }

    response
}

/// Buffers a small JSON body, stashes a redacted copy in request extensions,
/// and restores the body for downstream consumers. Non-JSON and oversized
/// bodies pass through untouched.
async fn buffer_and_redact(req: Request) -> (Request, Option<Value>) {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    let within_limit = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .is_some_and(|len| len <= MAX_LOGGED_BODY_BYTES);

    if !is_json || !within_limit {
        let mut req = req;
        req.extensions_mut().insert(SanitizedBody(None));
        return (req, None);
    }

    let (parts, body) = req.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "Failed to buffer request body for logging");
            Bytes::new()
        }
    };

    let sanitized = serde_json::from_slice::<Value>(&bytes)
        .ok()
        .map(|body| redact_fields(&body));

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(SanitizedBody(sanitized.clone()));
    (req, sanitized)
}

/// Initializes the tracing subscriber: filtered console output plus daily
/// rolling error and JSON log files under `storage/logs`.
pub fn init_tracing() {
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let log_dir = "storage/logs";
    fs::create_dir_all(log_dir).expect("Failed to create logs directory");

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,http=info,tower_http=warn,hyper=info",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "puiux-click.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "puiux-click.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .init();
}
