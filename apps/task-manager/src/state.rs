//! Shared application state.

use database::postgres::DatabaseConnection;

/// Handles created once at startup and injected into routers.
///
/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
