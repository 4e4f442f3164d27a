//! Edge route guard: decides redirect-vs-continue per navigation from the
//! request path and the presence of the session cookie.
//!
//! This is a presence check only. Token signature and expiry are validated
//! by the API handlers; a forged cookie gets the user to the dashboard
//! shell and no further.

use axum::{
    extract::{Query, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::modules::auth::session::ACCESS_TOKEN_COOKIE;

/// Paths requiring a credential. Matches the prefix itself and sub-paths.
const PROTECTED_PREFIXES: &[&str] = &["/dashboard"];

/// Paths that are meaningless once credentialed.
const AUTH_ONLY_PATHS: &[&str] = &["/login", "/register"];

/// Infrastructure prefixes the guard never classifies. Any path containing
/// a dot (static assets) is excluded as well.
const EXCLUDED_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image", "/public"];

const LOGIN_PATH: &str = "/login";
const DEFAULT_LANDING: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    PassThrough,
    Redirect(String),
}

/// Pure classification of one navigation.
///
/// `redirect_param` is the `redirect` query parameter, honored after login
/// only when it is a same-origin absolute path: it must start with `/` and
/// not `//`, so an attacker-supplied URL can never bounce the user to
/// another host.
pub fn classify(path: &str, has_credential: bool, redirect_param: Option<&str>) -> GuardDecision {
    if is_excluded(path) {
        return GuardDecision::PassThrough;
    }

    if is_protected(path) && !has_credential {
        return GuardDecision::Redirect(format!("{LOGIN_PATH}?redirect={path}"));
    }

    if AUTH_ONLY_PATHS.contains(&path) && has_credential {
        let target = redirect_param
            .filter(|target| target.starts_with('/') && !target.starts_with("//"))
            .unwrap_or(DEFAULT_LANDING);
        return GuardDecision::Redirect(target.to_string());
    }

    GuardDecision::PassThrough
}

fn is_excluded(path: &str) -> bool {
    path.contains('.')
        || path == "/favicon.ico"
        || EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

#[derive(Debug, Deserialize)]
struct RedirectQuery {
    redirect: Option<String>,
}

pub async fn route_guard(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let has_credential = CookieJar::from_headers(req.headers())
        .get(ACCESS_TOKEN_COOKIE)
        .is_some();
    let redirect_param = Query::<RedirectQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|query| query.0.redirect);

    match classify(&path, has_credential, redirect_param.as_deref()) {
        GuardDecision::PassThrough => next.run(req).await,
        GuardDecision::Redirect(location) => Redirect::temporary(&location).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_path_without_credential_redirects_to_login() {
        assert_eq!(
            classify("/dashboard", false, None),
            GuardDecision::Redirect("/login?redirect=/dashboard".to_string())
        );
        assert_eq!(
            classify("/dashboard/sites/new", false, None),
            GuardDecision::Redirect("/login?redirect=/dashboard/sites/new".to_string())
        );
    }

    #[test]
    fn protected_path_with_credential_passes() {
        assert_eq!(classify("/dashboard", true, None), GuardDecision::PassThrough);
    }

    #[test]
    fn auth_only_path_with_credential_redirects_to_landing() {
        assert_eq!(
            classify("/login", true, None),
            GuardDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(
            classify("/register", true, None),
            GuardDecision::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn same_origin_redirect_param_is_honored() {
        assert_eq!(
            classify("/login", true, Some("/dashboard/settings")),
            GuardDecision::Redirect("/dashboard/settings".to_string())
        );
    }

    #[test]
    fn external_redirect_param_falls_back_to_landing() {
        assert_eq!(
            classify("/login", true, Some("https://evil.example")),
            GuardDecision::Redirect("/dashboard".to_string())
        );
        // Protocol-relative URLs resolve to another host too.
        assert_eq!(
            classify("/login", true, Some("//evil.example")),
            GuardDecision::Redirect("/dashboard".to_string())
        );
    }

    #[test]
    fn auth_only_path_without_credential_passes() {
        assert_eq!(classify("/login", false, None), GuardDecision::PassThrough);
    }

    #[test]
    fn public_path_passes_regardless_of_credential() {
        assert_eq!(classify("/", false, None), GuardDecision::PassThrough);
        assert_eq!(classify("/", true, None), GuardDecision::PassThrough);
    }

    #[test]
    fn infrastructure_paths_are_never_classified() {
        // Even though /api and asset paths never carry a cookie, they must
        // not be bounced to the login page.
        assert_eq!(
            classify("/api/sites", false, None),
            GuardDecision::PassThrough
        );
        assert_eq!(
            classify("/favicon.ico", false, None),
            GuardDecision::PassThrough
        );
        assert_eq!(
            classify("/_next/static/chunk.js", false, None),
            GuardDecision::PassThrough
        );
        assert_eq!(
            classify("/public/logo.svg", false, None),
            GuardDecision::PassThrough
        );
    }
}
