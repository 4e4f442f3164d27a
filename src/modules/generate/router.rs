use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::generate_site;

pub fn init_generate_router() -> Router<AppState> {
    Router::new().route("/", post(generate_site))
}
