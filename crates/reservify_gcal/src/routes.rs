// --- File: crates/reservify_gcal/src/routes.rs ---

use crate::auth::create_calendar_hub;
use crate::handlers::{create_reservation_handler, ReservationState};
use crate::service::{GcalServiceError, GoogleCalendarService};
use axum::{routing::post, Router};
use reservify_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing the reservation routes over an already built
/// calendar client. Mount it under `/api`.
pub fn routes(state: Arc<ReservationState>) -> Router {
    Router::new()
        .route("/reservations", post(create_reservation_handler))
        .with_state(state)
}

/// Authenticates against Google once and builds the reservation routes on
/// top of the resulting client.
pub async fn routes_from_config(config: Arc<AppConfig>) -> Result<Router, GcalServiceError> {
    let calendar_hub = create_calendar_hub(&config.gcal).await?;
    let state = Arc::new(ReservationState {
        config,
        calendar: Arc::new(GoogleCalendarService::new(Arc::new(calendar_hub))),
    });
    Ok(routes(state))
}
