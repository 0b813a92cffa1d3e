use axum::Router;

pub mod config;
pub mod consts;
pub mod db;
pub mod errors;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;
pub mod utils;
pub mod workflow;

use crate::routes::api_route::api_router;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router(state.clone()))
        .with_state(state)
}
