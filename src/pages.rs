//! Minimal HTML shells for the page routes the route guard classifies.
//!
//! The production front end is a separate SPA; these handlers exist so the
//! guard has concrete navigation targets when this server runs standalone.

use axum::response::Html;

pub async fn home_page() -> Html<&'static str> {
    Html("<!doctype html><title>PUIUX Click</title><h1>PUIUX Click</h1>")
}

pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Login - PUIUX Click</title><h1>Login</h1>")
}

pub async fn register_page() -> Html<&'static str> {
    Html("<!doctype html><title>Register - PUIUX Click</title><h1>Register</h1>")
}

pub async fn dashboard_page() -> Html<&'static str> {
    Html("<!doctype html><title>Dashboard - PUIUX Click</title><h1>Dashboard</h1>")
}
