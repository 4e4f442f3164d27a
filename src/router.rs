use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::error_envelope::error_envelope;
use crate::middleware::route_guard::route_guard;
use crate::modules::auth::router::init_auth_router;
use crate::modules::generate::router::init_generate_router;
use crate::modules::sites::router::init_sites_router;
use crate::pages::{dashboard_page, home_page, login_page, register_page};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/sites", init_sites_router())
                .nest("/generate", init_generate_router()),
        )
        .route("/", get(home_page))
        .route("/login", get(login_page))
        .route("/register", get(register_page))
        .route("/dashboard", get(dashboard_page))
        .route("/dashboard/{*rest}", get(dashboard_page))
        .with_state(state.clone())
        // Innermost of the pipeline: normalizes every failure into the
        // envelope body before the logger observes the response.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_envelope,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logging_middleware,
        ))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        // Edge-most: page navigation is classified before anything below
        // runs, mirroring the front end's edge middleware.
        .layer(middleware::from_fn(route_guard))
}
