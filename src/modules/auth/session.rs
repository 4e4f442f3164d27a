//! Session credential manager: the sole place that writes or clears the
//! session cookies.
//!
//! The issued access token lives in two sinks that independent layers read:
//! the response body (consumed by in-page logic) and the `accessToken`
//! cookie (consumed by the edge route guard, which cannot read the page's
//! store). [`establish`] owns both writes as one logical operation so they
//! can never drift apart; there is deliberately no public setter for either
//! sink on its own.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token};

use super::model::{AuthResponse, User};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Refresh tokens are only ever sent back to the auth endpoints.
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Issues a session for `user`: creates both tokens, writes both cookies,
/// and returns the response body carrying the same access token. Cookie
/// max-age matches the token lifetime, so expiry of the two sinks is tied
/// to the same clock.
pub fn establish(
    jar: CookieJar,
    user: User,
    jwt_config: &JwtConfig,
) -> Result<(CookieJar, AuthResponse), AppError> {
    let access_token = create_access_token(user.id, &user.email, jwt_config)?;
    let refresh_token = create_refresh_token(user.id, &user.email, jwt_config)?;

    let access_cookie = Cookie::build((ACCESS_TOKEN_COOKIE, access_token.clone()))
        .path("/")
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(jwt_config.access_token_expiry))
        .build();

    let refresh_cookie = Cookie::build((REFRESH_TOKEN_COOKIE, refresh_token))
        .path(REFRESH_COOKIE_PATH)
        .same_site(SameSite::Strict)
        .http_only(true)
        .max_age(Duration::seconds(jwt_config.refresh_token_expiry))
        .build();

    let jar = jar.add(access_cookie).add(refresh_cookie);

    let response = AuthResponse {
        access_token,
        expires_in: jwt_config.access_token_expiry,
        user,
    };

    Ok((jar, response))
}

/// Clears both session cookies unconditionally. Infallible: logout must be
/// able to call this on every exit path.
pub fn clear(jar: CookieJar) -> CookieJar {
    let access_removal = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .build();
    let refresh_removal = Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path(REFRESH_COOKIE_PATH)
        .build();

    jar.remove(access_removal).remove(refresh_removal)
}
