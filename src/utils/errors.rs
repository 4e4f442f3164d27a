use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// The message carried by a failure: either a plain string or, for
/// validation failures, the list of field-level messages.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(messages) => f.write_str(&messages.join(", ")),
        }
    }
}

/// Client-facing message for every unrecognized failure.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Application error with an explicit HTTP status.
///
/// Errors built through the named constructors are *recognized* failures:
/// their status and message pass through to the client unaltered. Anything
/// converted via the blanket `From` impl (sqlx, reqwest, anyhow, ...) is an
/// *unrecognized* failure and is normalized to a 500 with a generic message;
/// the original error is preserved for logs and the non-production `stack`
/// field only.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: ErrorMessage,
    pub source: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        let source = err.into();
        Self {
            status,
            message: ErrorMessage::Text(source.to_string()),
            source,
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_gateway<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_GATEWAY, err)
    }

    /// A validation failure carrying the field-level messages as a list.
    pub fn validation(messages: Vec<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            source: anyhow::anyhow!(messages.join(", ")),
            message: ErrorMessage::List(messages),
        }
    }

    /// An unrecognized failure: 500 with the generic client-facing message.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: ErrorMessage::Text(GENERIC_SERVER_ERROR.to_string()),
            source: err.into(),
        }
    }
}

/// Failure detail stashed in response extensions so the envelope middleware
/// can build the final body and the logging middleware can emit the error
/// event. The `source` chain is only ever exposed outside production.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: ErrorMessage,
    pub source: String,
}

/// Uniform error body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    /// ISO-8601 UTC timestamp of when the failure was observed.
    pub timestamp: String,
    pub path: String,
    pub method: String,
    pub message: ErrorMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = ErrorDetail {
            message: self.message.clone(),
            source: format!("{:?}", self.source),
        };

        // Minimal body; the envelope middleware replaces it with the full
        // ErrorEnvelope using the request's method and path.
        let mut response = (self.status, Json(json!({ "message": self.message }))).into_response();
        response.extensions_mut().insert(detail);
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_error_keeps_status_and_message() {
        let err = AppError::bad_request(anyhow::anyhow!("slug already exists"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            ErrorMessage::Text("slug already exists".to_string())
        );
    }

    #[test]
    fn unrecognized_error_is_masked() {
        let err = AppError::from(std::io::Error::other("connection reset"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message,
            ErrorMessage::Text(GENERIC_SERVER_ERROR.to_string())
        );
        // Original message survives in the source chain for diagnostics.
        assert!(format!("{:?}", err.source).contains("connection reset"));
    }

    #[test]
    fn validation_error_carries_message_list() {
        let err = AppError::validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            serde_json::to_value(&err.message).unwrap(),
            serde_json::json!(["a", "b"])
        );
    }

    #[test]
    fn into_response_stashes_detail() {
        let response = AppError::unauthorized("Invalid token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert_eq!(
            detail.message,
            ErrorMessage::Text("Invalid token".to_string())
        );
    }
}
