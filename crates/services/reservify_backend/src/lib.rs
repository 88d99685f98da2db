// File: services/reservify_backend/src/lib.rs
//! Assembles the Reservify HTTP application.

use axum::Router;
use reservify_config::ConfigError;
use reservify_gcal::service::GcalServiceError;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Reasons the service can fail to start.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to create calendar client: {0}")]
    Calendar(#[from] GcalServiceError),
    #[error("Failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the full application: the health check at `/`, the reservation
/// routes under `/api`, permissive CORS for browser front-ends and request
/// tracing. With the `openapi` feature, Swagger UI is served at `/api/docs`.
pub fn build_app(reservation_router: Router) -> Router {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut app = Router::new()
        .merge(reservify_common::routes())
        .nest("/api", reservation_router);

    #[cfg(feature = "openapi")]
    {
        use reservify_gcal::doc::ReservationApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Reservify API",
                version = "0.1.0",
                description = "Restaurant reservations booked on Google Calendar",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            paths(reservify_common::handlers::health_handler),
            components(schemas(reservify_common::handlers::HealthResponse)),
            tags((name = "Health", description = "Liveness")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(ReservationApiDoc::openapi());
        tracing::info!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
