// --- File: crates/reservify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error response shape
pub mod handlers; // Health check handler
pub mod logging; // Logging utilities
pub mod routes; // Shared routes
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

pub use error::{error_response, ErrorResponse, HttpStatusCode};

pub use logging::{init, init_with_level, log_error};
