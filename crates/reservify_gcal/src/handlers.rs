// File: crates/reservify_gcal/src/handlers.rs
use crate::logic::{book_reservation, GcalError, ReservationRequest, ReservationResponse};
use crate::service::SharedCalendar;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
};
use reservify_common::{error_response, log_error, HttpStatusCode};
use reservify_config::AppConfig;
use std::sync::Arc;
use tracing::info;

// Define shared state needed by the reservation handlers
#[derive(Clone)]
pub struct ReservationState {
    pub config: Arc<AppConfig>,
    pub calendar: SharedCalendar, // Share the authenticated Calendar client
}

impl HttpStatusCode for GcalError {
    fn status_code(&self) -> u16 {
        match self {
            GcalError::MissingStartDateTime | GcalError::InvalidRequest(_) => 400,
            GcalError::Conflict => 409,
            GcalError::TimeParseError(_)
            | GcalError::ConfigError(_)
            | GcalError::ServiceError(_) => 500,
        }
    }

    fn public_message(&self) -> String {
        match self {
            GcalError::MissingStartDateTime => "Missing startDateTime",
            GcalError::InvalidRequest(_) => "Invalid request body",
            GcalError::Conflict => "Time slot not available",
            _ => "Internal server error",
        }
        .to_string()
    }
}

impl IntoResponse for GcalError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

/// Handler to book a reservation on the calendar.
#[axum::debug_handler]
pub async fn create_reservation_handler(
    State(state): State<Arc<ReservationState>>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<Json<ReservationResponse>, GcalError> {
    // Without a JSON content type no field can be read, startDateTime included.
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            info!("Reservation posted without a JSON content type");
            GcalError::MissingStartDateTime
        }
        other => {
            info!("Rejected reservation body: {}", other.body_text());
            GcalError::InvalidRequest(other.body_text())
        }
    })?;

    match book_reservation(state.calendar.as_ref(), &state.config.gcal, request).await {
        Ok(created_event) => {
            info!("Reservation added to calendar: {:?}", created_event.event_id);
            Ok(Json(ReservationResponse::booked()))
        }
        Err(e) => {
            if e.status_code() >= 500 {
                log_error(&e, "Error creating reservation");
            } else {
                info!("Reservation rejected: {}", e);
            }
            Err(e)
        }
    }
}
