// --- File: crates/reservify_common/src/handlers.rs ---
use axum::Json;
use serde::{Deserialize, Serialize};

pub const HEALTH_MESSAGE: &str = "Backend is running ✅";

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Health check: always answers 200 with a static message.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is reachable", body = HealthResponse)
    ),
    tag = "Health"
))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}
