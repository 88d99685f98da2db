// File: services/reservify_backend/src/main.rs
use reservify_backend::{build_app, StartupError};
use reservify_config::load_config;
use reservify_gcal::routes::routes_from_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    reservify_common::logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Arc::new(load_config()?);
    if config.gcal.calendar_id.is_none() {
        warn!("No calendar id configured (CALENDAR_ID); reservations will fail until it is set");
    }

    // Authenticate once; the client is shared by every request.
    let reservation_router = routes_from_config(config.clone()).await?;
    let app = build_app(reservation_router);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("✅ Server running at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
