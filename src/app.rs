use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/bh-location", get(handlers::bh_location))
        .route(
            "/api/overnight",
            get(handlers::get_overnight).post(handlers::post_overnight),
        )
        .route("/api/search", get(handlers::search))
        .route("/api/traces/:key", get(handlers::get_trace))
        .route("/api/loi-dates", get(handlers::get_loi_dates))
        .with_state(state)
}
