mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::test_app;
use puiux_click::config::environment::Environment;
use tower::ServiceExt;

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a location")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn dashboard_without_cookie_redirects_to_login() {
    let app = test_app(Environment::Development);

    let response = app.oneshot(get("/dashboard", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=/dashboard");
}

#[tokio::test]
async fn dashboard_with_cookie_passes_through() {
    let app = test_app(Environment::Development);

    let response = app
        .oneshot(get("/dashboard", Some("accessToken=abc")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_subpath_redirect_preserves_return_path() {
    let app = test_app(Environment::Development);

    let response = app.oneshot(get("/dashboard/sites", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=/dashboard/sites");
}

#[tokio::test]
async fn login_with_cookie_honors_same_origin_redirect() {
    let app = test_app(Environment::Development);

    let response = app
        .oneshot(get(
            "/login?redirect=/dashboard/sites",
            Some("accessToken=abc"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard/sites");
}

#[tokio::test]
async fn login_with_cookie_rejects_external_redirect() {
    let app = test_app(Environment::Development);

    let response = app
        .oneshot(get(
            "/login?redirect=https://evil.example",
            Some("accessToken=abc"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn login_with_cookie_and_no_redirect_goes_to_landing() {
    let app = test_app(Environment::Development);

    let response = app
        .oneshot(get("/login", Some("accessToken=abc")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn login_without_cookie_renders_normally() {
    let app = test_app(Environment::Development);

    let response = app.oneshot(get("/login", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_paths_are_never_redirected() {
    let app = test_app(Environment::Development);

    // Unauthenticated API calls get an envelope, not a login bounce.
    let response = app.oneshot(get("/api/sites", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn asset_paths_are_never_redirected() {
    let app = test_app(Environment::Development);

    let response = app.oneshot(get("/favicon.ico", None)).await.unwrap();

    // No route serves it here; the point is the guard stays out of the way.
    assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}
