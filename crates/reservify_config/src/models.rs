// --- File: crates/reservify_config/src/models.rs ---

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_KEY_PATH: &str = "service-account.json";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Riga";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16, // PORT or RESERVIFY__SERVER__PORT
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    /// Path to the service-account key file (GOOGLE_APPLICATION_CREDENTIALS).
    pub key_path: String,
    /// Calendar that receives the reservations (CALENDAR_ID).
    pub calendar_id: Option<String>,
    /// IANA zone attached to created events and used for offset-less start times.
    pub time_zone: String,
}

impl GcalConfig {
    /// The configured zone. `load_config` rejects unknown names, so this only
    /// returns `None` for hand-built configs.
    pub fn tz(&self) -> Option<Tz> {
        self.time_zone.parse().ok()
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gcal: GcalConfig,
}
