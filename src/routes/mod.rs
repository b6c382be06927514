use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod public;
pub mod todo;
pub mod views;

pub const API_PREFIX: &str = "/api";

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(public::router())
        .merge(todo::router(state));

    Router::new()
        .nest(API_PREFIX, api)
        .merge(views::router())
}
