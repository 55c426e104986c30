use axum::{Router, routing::get};
use axum_helpers::health_router;

use crate::state::AppState;

pub mod health;
pub mod home;
pub mod tasks;

/// All application routes, each sub-router with its state already applied.
///
/// - `GET /`: informational page
/// - `/task`, `/task/` and `/task/{id}`: task CRUD
/// - `GET /health`: liveness with app name/version
/// - `GET /ready`: readiness with a database ping
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .merge(tasks::router(state))
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()))
}

/// Router with the /ready endpoint that checks the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
