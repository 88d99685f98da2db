// --- File: crates/reservify_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventAttendee, EventDateTime, Scope};
use reservify_common::services::{BoxFuture, CalendarEvent, CalendarEventResult, CalendarService};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Calendar authentication failed: {0}")]
    Auth(#[from] std::io::Error),
}

/// The calendar client shared by all request handlers.
pub type SharedCalendar = Arc<dyn CalendarService<Error = GcalServiceError>>;

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Lists the ids of the events of `calendar_id` that intersect
    /// `[time_min, time_max)`.
    ///
    /// Recurring events are expanded (`singleEvents=true`) and ordered by start
    /// time. Cancelled events are not returned. Only the first result page is
    /// read: callers use this to decide whether a short window is free, and
    /// one page is enough to answer that.
    ///
    /// # Errors
    ///
    /// Returns a `GcalServiceError` if the token cannot be obtained or the API
    /// call fails.
    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<String>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_, events_list) = calendar_hub
                .events()
                .list(&calendar_id)
                .time_min(time_min)
                .time_max(time_max)
                .single_events(true) // Expand recurring events
                .order_by("startTime")
                .add_scope(Scope::Event)
                .doit()
                .await?;

            let events = event_ids(events_list.items.unwrap_or_default());
            debug!(
                "Found {} event(s) in {} between {} and {}",
                events.len(),
                calendar_id,
                time_min,
                time_max
            );
            Ok(events)
        })
    }

    /// Inserts `event` into `calendar_id`.
    ///
    /// Start and end are sent as UTC instants together with the event's IANA
    /// time zone, which is what Google uses for display. Attendees are passed
    /// through as given.
    ///
    /// # Errors
    ///
    /// Returns a `GcalServiceError` if the token cannot be obtained or the API
    /// call fails.
    fn insert_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = google_event_from(event);

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .add_scope(Scope::Event)
                .doit()
                .await?;

            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// Converts our event into the Google API payload.
pub(crate) fn google_event_from(event: CalendarEvent) -> Event {
    let attendees = event
        .attendees
        .into_iter()
        .map(|email| EventAttendee {
            email: Some(email),
            ..Default::default()
        })
        .collect();

    Event {
        summary: Some(event.summary),
        description: event.description,
        start: Some(EventDateTime {
            date_time: Some(event.start_time.with_timezone(&Utc)),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end_time.with_timezone(&Utc)),
            time_zone: Some(event.time_zone),
            ..Default::default()
        }),
        attendees: Some(attendees),
        ..Default::default()
    }
}

/// Ids of listed events. An event without an id still occupies its slot, so
/// it is kept as an empty id.
pub(crate) fn event_ids(events: Vec<Event>) -> Vec<String> {
    events
        .into_iter()
        .map(|event| event.id.unwrap_or_default())
        .collect()
}

/// In-memory calendar for tests.
///
/// Stores inserted events per calendar, answers `list_events` with the same
/// intersection rule as Google, counts calls, and can be switched into a
/// failing mode to simulate revoked credentials or an outage.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock calendar service for testing.
    #[derive(Default)]
    pub struct MockCalendarService {
        events: Mutex<HashMap<String, Vec<(String, CalendarEvent)>>>,
        failure: Mutex<Option<String>>,
        list_calls: AtomicUsize,
        insert_calls: AtomicUsize,
    }

    impl MockCalendarService {
        /// Create a new mock calendar service.
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds an existing event without counting it as an insert.
        pub fn with_event(self, calendar_id: &str, event: CalendarEvent) -> Self {
            self.store(calendar_id, event);
            self
        }

        /// Makes every subsequent call fail with an authentication error.
        pub fn fail_with(&self, message: &str) {
            *self.failure.lock().unwrap() = Some(message.to_string());
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn insert_calls(&self) -> usize {
            self.insert_calls.load(Ordering::SeqCst)
        }

        /// Events currently stored for `calendar_id`, in insertion order.
        pub fn events(&self, calendar_id: &str) -> Vec<CalendarEvent> {
            self.events
                .lock()
                .unwrap()
                .get(calendar_id)
                .map(|events| events.iter().map(|(_, e)| e.clone()).collect())
                .unwrap_or_default()
        }

        fn store(&self, calendar_id: &str, event: CalendarEvent) -> String {
            let event_id = format!("mock-event-{}", uuid::Uuid::new_v4());
            self.events
                .lock()
                .unwrap()
                .entry(calendar_id.to_string())
                .or_default()
                .push((event_id.clone(), event));
            event_id
        }

        fn check_failure(&self) -> Result<(), GcalServiceError> {
            match self.failure.lock().unwrap().as_ref() {
                Some(message) => Err(GcalServiceError::Auth(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    message.clone(),
                ))),
                None => Ok(()),
            }
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = GcalServiceError;

        fn list_events(
            &self,
            calendar_id: &str,
            time_min: DateTime<Utc>,
            time_max: DateTime<Utc>,
        ) -> BoxFuture<'_, Vec<String>, Self::Error> {
            let calendar_id = calendar_id.to_string();

            Box::pin(async move {
                self.list_calls.fetch_add(1, Ordering::SeqCst);
                self.check_failure()?;

                let events = self.events.lock().unwrap();
                let mut matching: Vec<(DateTime<Utc>, String)> = events
                    .get(&calendar_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .filter(|(_, event)| {
                        event.start_time.with_timezone(&Utc) < time_max
                            && event.end_time.with_timezone(&Utc) > time_min
                    })
                    .map(|(event_id, event)| {
                        (event.start_time.with_timezone(&Utc), event_id.clone())
                    })
                    .collect();

                matching.sort_by_key(|(start, _)| *start);
                Ok(matching.into_iter().map(|(_, event_id)| event_id).collect())
            })
        }

        fn insert_event(
            &self,
            calendar_id: &str,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            let calendar_id = calendar_id.to_string();

            Box::pin(async move {
                self.insert_calls.fetch_add(1, Ordering::SeqCst);
                self.check_failure()?;

                let event_id = self.store(&calendar_id, event);
                Ok(CalendarEventResult {
                    event_id: Some(event_id),
                    status: "confirmed".to_string(),
                })
            })
        }
    }
}
