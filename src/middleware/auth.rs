use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, TokenKind};
use crate::modules::auth::session::ACCESS_TOKEN_COOKIE;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the access token and provides the authenticated
/// user's claims. Accepts a `Bearer` authorization header, falling back to
/// the `accessToken` cookie the session manager writes for browser clients.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    /// Get the user's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Missing authorization token".to_string()))?;

        let claims = verify_token(&token, &state.jwt_config, TokenKind::Access)?;

        Ok(AuthUser(claims))
    }
}

/// Access token from the authorization header or the session cookie.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    })
}

/// Best-effort identity lookup for log lines. Returns the verified claims
/// when a valid access token accompanies the request, `None` otherwise.
/// Never an error: identification in logs is optional.
pub fn current_claims(headers: &HeaderMap, jwt_config: &JwtConfig) -> Option<Claims> {
    let token = bearer_token(headers)?;
    verify_token(&token, jwt_config, TokenKind::Access).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::jwt::JwtConfig;
    use crate::utils::jwt::create_access_token;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn bearer_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("accessToken=cookie-token"),
        );

        assert_eq!(bearer_token(&headers), Some("header-token".to_string()));
    }

    #[test]
    fn cookie_fallback_when_header_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; accessToken=cookie-token"),
        );

        assert_eq!(bearer_token(&headers), Some("cookie-token".to_string()));
    }

    #[test]
    fn current_claims_resolves_valid_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "owner@example.com", &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let claims = current_claims(&headers, &config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "owner@example.com");
    }

    #[test]
    fn current_claims_is_none_for_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-jwt"),
        );

        assert!(current_claims(&headers, &test_config()).is_none());
    }
}
