use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/events/date", post(handlers::event::create_date_event))
        .route("/api/events/week", post(handlers::event::create_week_event))
        .route("/api/events/date", put(handlers::event::edit_date_event))
        .route("/api/events/week", put(handlers::event::edit_week_event))
        .route("/api/events", get(handlers::event::get_event))
}
