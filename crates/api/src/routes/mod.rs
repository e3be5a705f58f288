pub mod form;
pub mod health;
pub mod trigger;

use axum::{middleware::from_fn, Router};

use crate::middleware::request_id::request_id;
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(form::router())
        .merge(trigger::router(state))
        .layer(from_fn(request_id))
}
