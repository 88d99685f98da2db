// --- File: crates/reservify_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The calendar is the only external system this service talks to. Handlers
//! depend on the [`CalendarService`] trait rather than on the Google client so
//! an in-memory calendar can be injected in tests.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for calendar service operations.
///
/// Implementations must be object safe so they can be shared as
/// `Arc<dyn CalendarService<Error = E>>` across request handlers.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the ids of every event intersecting `[time_min, time_max)`.
    ///
    /// Recurring events are expanded into their single occurrences and the
    /// result is ordered by start time.
    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<String>, Self::Error>;

    /// Insert a new event into the calendar.
    fn insert_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// An event to be created in the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The summary or title of the event.
    pub summary: String,
    /// An optional description of the event.
    pub description: Option<String>,
    /// The start of the event, keeping the offset it was requested with.
    pub start_time: DateTime<FixedOffset>,
    /// The end of the event.
    pub end_time: DateTime<FixedOffset>,
    /// IANA time zone name the calendar should display the event in.
    pub time_zone: String,
    /// E-mail addresses invited to the event.
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
}
