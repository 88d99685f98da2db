// File: crates/reservify_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{ReservationRequest, ReservationResponse};
use reservify_common::ErrorResponse;

#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation added to the calendar", body = ReservationResponse,
         example = json!({
             "success": true,
             "message": "Reservation added to calendar"
         })
        ),
        (status = 400, description = "startDateTime missing or body malformed", body = ErrorResponse,
         example = json!({ "error": "Missing startDateTime" })
        ),
        (status = 409, description = "An event already occupies the 2-hour slot", body = ErrorResponse,
         example = json!({ "error": "Time slot not available" })
        ),
        (status = 500, description = "Calendar, credential or date failure (details are logged)", body = ErrorResponse,
         example = json!({ "error": "Internal server error" })
        )
    ),
    tag = "Reservations"
)]
fn doc_create_reservation_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_reservation_handler),
    components(schemas(ReservationRequest, ReservationResponse, ErrorResponse)),
    tags(
        (name = "Reservations", description = "Restaurant reservations on Google Calendar")
    )
)]
pub struct ReservationApiDoc;
