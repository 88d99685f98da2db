// --- File: crates/reservify_gcal/src/logic.rs ---
use crate::service::GcalServiceError;
use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use reservify_common::services::{CalendarEvent, CalendarEventResult, CalendarService};
use reservify_config::GcalConfig;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Every reservation occupies the table for this long.
pub const RESERVATION_DURATION_HOURS: i64 = 2;

/// Offset-less formats accepted for `startDateTime`, tried in order. They are
/// interpreted in the configured calendar time zone.
const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// ISO 8601 forms with an explicit offset that RFC 3339 does not cover:
/// minutes-only times and basic (`+0300`) offsets. A trailing `Z` is
/// rewritten to `+00:00` before these are tried.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("Missing startDateTime")]
    MissingStartDateTime,
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),
    #[error("Time slot not available")]
    Conflict,
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Calendar service error: {0}")]
    ServiceError(#[from] GcalServiceError),
}

// --- Data Structures ---
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "+371 2000 0000"))]
    pub phone: Option<String>,
    /// ISO 8601 start of the reservation. Required.
    #[cfg_attr(feature = "openapi", schema(example = "2024-06-01T18:00:00+03:00"))]
    pub start_date_time: Option<String>,
    /// A number, or a numeric string as posted by HTML forms.
    #[serde(default, deserialize_with = "deserialize_party_size")]
    #[cfg_attr(feature = "openapi", schema(example = 4))]
    pub party_size: Option<u32>,
    #[cfg_attr(feature = "openapi", schema(example = "Window seat, please"))]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PartySize {
    Number(u32),
    Text(String),
}

fn deserialize_party_size<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PartySize>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PartySize::Number(size)) => Ok(Some(size)),
        Some(PartySize::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse().map(Some).map_err(|_| {
                serde::de::Error::custom(format!("partySize is not a number: {}", text))
            })
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReservationResponse {
    pub success: bool,
    #[cfg_attr(feature = "openapi", schema(example = "Reservation added to calendar"))]
    pub message: String,
}

impl ReservationResponse {
    pub fn booked() -> Self {
        Self {
            success: true,
            message: "Reservation added to calendar".to_string(),
        }
    }
}

/// The slot a reservation occupies: `[start, start + 2h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl BookingWindow {
    /// The window keeps the offset of `start`, so the end reads in the same
    /// local time as the request.
    pub fn starting_at(start: DateTime<FixedOffset>) -> Self {
        Self {
            start,
            end: start + Duration::hours(RESERVATION_DURATION_HOURS),
        }
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }
}

/// Parses `startDateTime`.
///
/// Values with an offset (`2024-06-01T18:00:00+03:00`, `2024-06-01T18:00+0300`,
/// `...Z`) keep it. Values without one (`2024-06-01T18:00`, as sent by HTML
/// `datetime-local` inputs) are read as wall-clock time in `zone`; the earlier
/// instant wins when the clock is set back, and a time skipped by a DST jump
/// is rejected. A bare date (`2024-06-01`) is midnight UTC.
pub fn parse_start_date_time(raw: &str, zone: Tz) -> Result<DateTime<FixedOffset>, GcalError> {
    let raw = raw.trim();
    if let Ok(start) = DateTime::parse_from_rfc3339(raw) {
        return Ok(start);
    }

    let with_offset = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(start) = DateTime::parse_from_str(&with_offset, format) {
            return Ok(start);
        }
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return zone
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.fixed_offset())
                .ok_or_else(|| {
                    GcalError::TimeParseError(format!("{} does not exist in {}", raw, zone))
                });
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(GcalError::TimeParseError(format!(
        "Invalid startDateTime: {}",
        raw
    )))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Builds the calendar event for a reservation occupying `window`.
pub fn build_reservation_event(
    request: &ReservationRequest,
    window: &BookingWindow,
    time_zone: &str,
) -> CalendarEvent {
    let name = present(&request.name).unwrap_or("Guest");
    let party_size = match request.party_size {
        Some(size) if size > 0 => size.to_string(),
        _ => "N/A".to_string(),
    };
    let email = present(&request.email);

    let mut description = Vec::new();
    if let Some(email) = email {
        description.push(format!("Email: {}", email));
    }
    if let Some(phone) = present(&request.phone) {
        description.push(format!("Phone: {}", phone));
    }
    description.push(format!(
        "Notes: {}",
        present(&request.notes).unwrap_or("None")
    ));

    CalendarEvent {
        summary: format!("Reservation: {} ({} guests)", name, party_size),
        description: Some(description.join("\n")),
        start_time: window.start,
        end_time: window.end,
        time_zone: time_zone.to_string(),
        attendees: email.map(|e| vec![e.to_string()]).unwrap_or_default(),
    }
}

/// Books a reservation: validates, checks the slot, inserts the event.
///
/// The check and the insert are two independent calendar calls with nothing
/// holding the slot in between. Two concurrent requests for overlapping
/// slots can both see it free and both insert; Google Calendar offers no
/// conditional insert to close that gap.
///
/// # Errors
///
/// * `MissingStartDateTime` if the request has no start, before any calendar call.
/// * `Conflict` if any event intersects the slot; nothing is inserted.
/// * `TimeParseError`, `ConfigError`, `ServiceError` for everything that
///   should surface as an internal failure.
pub async fn book_reservation(
    calendar: &dyn CalendarService<Error = GcalServiceError>,
    config: &GcalConfig,
    request: ReservationRequest,
) -> Result<CalendarEventResult, GcalError> {
    let raw_start = present(&request.start_date_time).ok_or(GcalError::MissingStartDateTime)?;

    let calendar_id = config
        .calendar_id
        .as_deref()
        .ok_or_else(|| GcalError::ConfigError("calendar_id is not configured".to_string()))?;
    let zone = config.tz().ok_or_else(|| {
        GcalError::ConfigError(format!("unknown time zone: {}", config.time_zone))
    })?;

    let window = BookingWindow::starting_at(parse_start_date_time(raw_start, zone)?);
    debug!("Checking slot {} - {}", window.start, window.end);

    let existing = calendar
        .list_events(calendar_id, window.start_utc(), window.end_utc())
        .await?;
    if !existing.is_empty() {
        info!(
            "Slot {} - {} overlaps {} existing event(s)",
            window.start,
            window.end,
            existing.len()
        );
        return Err(GcalError::Conflict);
    }

    let event = build_reservation_event(&request, &window, &config.time_zone);
    let created = calendar.insert_event(calendar_id, event).await?;
    Ok(created)
}
