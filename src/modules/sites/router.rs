use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_site, delete_site, get_site, get_sites, publish_site, update_site,
};

pub fn init_sites_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_site).get(get_sites))
        .route(
            "/{id}",
            get(get_site).patch(update_site).delete(delete_site),
        )
        .route("/{id}/publish", post(publish_site))
}
