use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            post(handlers::availability::add_availability)
                .delete(handlers::availability::remove_participant),
        )
        .route(
            "/api/availability/check-name",
            post(handlers::availability::check_display_name),
        )
        .route(
            "/api/availability/self",
            get(handlers::availability::get_self_availability)
                .delete(handlers::availability::remove_self_availability),
        )
        .route(
            "/api/availability/all",
            get(handlers::availability::get_all_availability),
        )
}
