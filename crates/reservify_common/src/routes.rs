// --- File: crates/reservify_common/src/routes.rs ---

use axum::{routing::get, Router};

use crate::handlers::health_handler;

/// Creates a router containing the routes shared by every deployment.
///
/// Generic over the state so it can be merged into any application router.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(health_handler))
}
