use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use tracing::info;
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, current_claims};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorEnvelope};
use crate::utils::jwt::verify_token;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, LoginRequest, RegisterRequestDto, TokenKind, User};
use super::service::AuthService;
use super::session;

/// Register a new user and open a session
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered and session issued", body = AuthResponse),
        (status = 400, description = "Email already exists", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
pub async fn register_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    let (jar, response) = session::establish(jar, user, &state.jwt_config)?;
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// Login and open a session
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = AuthService::login_user(&state.db, dto).await?;
    let (jar, response) = session::establish(jar, user, &state.jwt_config)?;
    Ok((jar, Json(response)))
}

/// Exchange the refresh cookie for a fresh session
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Session refreshed", body = AuthResponse),
        (status = 401, description = "Missing or invalid refresh token", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
pub async fn refresh_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let token = jar
        .get(session::REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::unauthorized("Missing refresh token".to_string()))?;

    let claims = verify_token(&token, &state.jwt_config, TokenKind::Refresh)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::unauthorized("Invalid refresh token".to_string()))?;

    let user = AuthService::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid refresh token".to_string()))?;

    let (jar, response) = session::establish(jar, user, &state.jwt_config)?;
    Ok((jar, Json(response)))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "Authentication"
)]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: axum::http::HeaderMap,
) -> (StatusCode, CookieJar) {
    // Best-effort bookkeeping only. Whatever happens here, both cookies are
    // cleared below; an expired or garbled token must not trap the user in
    // a half-logged-out state.
    if let Some(claims) = current_claims(&headers, &state.jwt_config) {
        info!(user.id = %claims.sub, "User logged out");
    }

    (StatusCode::NO_CONTENT, session::clear(jar))
}

/// Current authenticated profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = User),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AuthService::find_by_id(&state.db, auth_user.user_id()?)
        .await?
        .ok_or_else(|| AppError::unauthorized("Account no longer exists".to_string()))?;

    Ok(Json(user))
}
