// File: crates/reservify_gcal/src/auth.rs
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    CalendarHub,
};
use reservify_config::GcalConfig;
use std::path::Path;
use tracing::info;

use crate::service::GcalServiceError;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds the authenticated Calendar client from the service-account key at
/// `config.key_path`. Meant to be called once at startup; the hub is cheap to
/// share behind an `Arc`.
pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, GcalServiceError> {
    let sa_key = read_service_account_key(Path::new(&config.key_path)).await?;
    info!(
        "Loaded service account {} from {}",
        sa_key.client_email, config.key_path
    );

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}
