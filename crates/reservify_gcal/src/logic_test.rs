#[cfg(test)]
mod tests {
    use crate::logic::{
        book_reservation, build_reservation_event, parse_start_date_time, BookingWindow,
        GcalError, ReservationRequest,
    };
    use crate::service::mock::MockCalendarService;
    use chrono::{DateTime, Duration};
    use chrono_tz::Tz;
    use reservify_common::services::CalendarEvent;
    use reservify_config::GcalConfig;
    use serde_json::json;

    const CALENDAR_ID: &str = "restaurant@group.calendar.google.com";

    fn gcal_config() -> GcalConfig {
        GcalConfig {
            key_path: "service-account.json".to_string(),
            calendar_id: Some(CALENDAR_ID.to_string()),
            time_zone: "Europe/Riga".to_string(),
        }
    }

    fn jane(start: &str) -> ReservationRequest {
        ReservationRequest {
            name: Some("Jane".to_string()),
            start_date_time: Some(start.to_string()),
            party_size: Some(4),
            ..Default::default()
        }
    }

    fn existing_event(start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            summary: "Private dinner".to_string(),
            description: None,
            start_time: DateTime::parse_from_rfc3339(start).unwrap(),
            end_time: DateTime::parse_from_rfc3339(end).unwrap(),
            time_zone: "Europe/Riga".to_string(),
            attendees: vec![],
        }
    }

    // --- parse_start_date_time ---

    #[test]
    fn test_parse_keeps_explicit_offset() {
        for raw in [
            "2024-06-01T18:00:00+03:00",
            "2024-06-01T18:00+03:00",
            "2024-06-01T18:00:00+0300",
            "2024-06-01T18:00+0300",
            "2024-06-01T18:00:00.000+03:00",
            "2024-06-01 18:00+03:00",
        ] {
            let start = parse_start_date_time(raw, Tz::Europe__Riga).unwrap();
            assert_eq!(start.to_rfc3339(), "2024-06-01T18:00:00+03:00", "input {raw}");
        }
    }

    #[test]
    fn test_parse_minutes_only_utc_designator() {
        let start = parse_start_date_time("2024-06-01T15:00Z", Tz::Europe__Riga).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-01T15:00:00+00:00");
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let start = parse_start_date_time("2024-06-01", Tz::Europe__Riga).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_accepts_utc_designator() {
        let start = parse_start_date_time("2024-06-01T15:00:00.000Z", Tz::Europe__Riga).unwrap();
        assert_eq!(start.offset().local_minus_utc(), 0);
        assert_eq!(
            start,
            DateTime::parse_from_rfc3339("2024-06-01T18:00:00+03:00").unwrap()
        );
    }

    #[test]
    fn test_parse_offsetless_uses_configured_zone() {
        for raw in [
            "2024-06-01T18:00:00",
            "2024-06-01T18:00",
            "2024-06-01 18:00",
            "2024-06-01T18:00:00.000",
        ] {
            let start = parse_start_date_time(raw, Tz::Europe__Riga).unwrap();
            assert_eq!(start.to_rfc3339(), "2024-06-01T18:00:00+03:00", "input {raw}");
        }

        let winter = parse_start_date_time("2024-12-20T19:30", Tz::Europe__Riga).unwrap();
        assert_eq!(winter.to_rfc3339(), "2024-12-20T19:30:00+02:00");
    }

    #[test]
    fn test_parse_ambiguous_local_time_takes_earlier_instant() {
        // Clocks go back from 04:00 EEST to 03:00 EET on 2024-10-27.
        let start = parse_start_date_time("2024-10-27T03:30", Tz::Europe__Riga).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-10-27T03:30:00+03:00");
    }

    #[test]
    fn test_parse_rejects_time_skipped_by_dst() {
        // 03:00 jumps to 04:00 on 2024-03-31.
        let result = parse_start_date_time("2024-03-31T03:30", Tz::Europe__Riga);
        assert!(matches!(result, Err(GcalError::TimeParseError(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["tomorrow at seven", "2024-13-01T18:00", "18:00", ""] {
            let result = parse_start_date_time(raw, Tz::Europe__Riga);
            assert!(
                matches!(result, Err(GcalError::TimeParseError(_))),
                "input {raw:?} should not parse"
            );
        }
    }

    // --- ReservationRequest ---

    #[test]
    fn test_party_size_accepts_numeric_strings() {
        for (raw, expected) in [
            (json!(4), Some(4)),
            (json!("4"), Some(4)),
            (json!(" 12 "), Some(12)),
            (json!(""), None),
            (json!(null), None),
        ] {
            let request: ReservationRequest =
                serde_json::from_value(json!({ "partySize": raw.clone() })).unwrap();
            assert_eq!(request.party_size, expected, "partySize {raw}");
        }

        let request: ReservationRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.party_size, None);
    }

    #[test]
    fn test_party_size_rejects_words_and_negatives() {
        for raw in [json!("four"), json!(-2), json!(true)] {
            let result =
                serde_json::from_value::<ReservationRequest>(json!({ "partySize": raw.clone() }));
            assert!(result.is_err(), "partySize {raw} should be rejected");
        }
    }

    // --- BookingWindow ---

    #[test]
    fn test_window_is_two_hours_in_request_offset() {
        let start = DateTime::parse_from_rfc3339("2024-06-01T18:00:00+03:00").unwrap();
        let window = BookingWindow::starting_at(start);

        assert_eq!(window.start, start);
        assert_eq!(window.end.to_rfc3339(), "2024-06-01T20:00:00+03:00");
        assert_eq!(window.end - window.start, Duration::hours(2));
        assert_eq!(window.end_utc().to_rfc3339(), "2024-06-01T17:00:00+00:00");
    }

    // --- build_reservation_event ---

    #[test]
    fn test_event_for_name_and_party_size_only() {
        let request = jane("2024-06-01T18:00:00+03:00");
        let start = DateTime::parse_from_rfc3339("2024-06-01T18:00:00+03:00").unwrap();
        let window = BookingWindow::starting_at(start);

        let event = build_reservation_event(&request, &window, "Europe/Riga");

        assert_eq!(event.summary, "Reservation: Jane (4 guests)");
        assert_eq!(event.description.as_deref(), Some("Notes: None"));
        assert_eq!(event.start_time, window.start);
        assert_eq!(event.end_time.to_rfc3339(), "2024-06-01T20:00:00+03:00");
        assert_eq!(event.time_zone, "Europe/Riga");
        assert!(event.attendees.is_empty());
    }

    #[test]
    fn test_event_with_contact_details_and_notes() {
        let request = ReservationRequest {
            name: Some("Jānis".to_string()),
            email: Some("janis@example.lv".to_string()),
            phone: Some("+371 2000 0000".to_string()),
            start_date_time: Some("2024-06-01T18:00:00+03:00".to_string()),
            party_size: Some(2),
            notes: Some("Anniversary".to_string()),
        };
        let start = DateTime::parse_from_rfc3339("2024-06-01T18:00:00+03:00").unwrap();

        let event =
            build_reservation_event(&request, &BookingWindow::starting_at(start), "Europe/Riga");

        assert_eq!(event.summary, "Reservation: Jānis (2 guests)");
        assert_eq!(
            event.description.as_deref(),
            Some("Email: janis@example.lv\nPhone: +371 2000 0000\nNotes: Anniversary")
        );
        assert_eq!(event.attendees, vec!["janis@example.lv".to_string()]);
    }

    #[test]
    fn test_event_placeholders_for_missing_fields() {
        let request = ReservationRequest {
            email: Some("   ".to_string()),
            notes: Some("".to_string()),
            party_size: Some(0),
            start_date_time: Some("2024-06-01T18:00:00+03:00".to_string()),
            ..Default::default()
        };
        let start = DateTime::parse_from_rfc3339("2024-06-01T18:00:00+03:00").unwrap();

        let event =
            build_reservation_event(&request, &BookingWindow::starting_at(start), "Europe/Riga");

        assert_eq!(event.summary, "Reservation: Guest (N/A guests)");
        assert_eq!(event.description.as_deref(), Some("Notes: None"));
        assert!(event.attendees.is_empty());
    }

    // --- book_reservation ---

    #[tokio::test]
    async fn test_missing_start_makes_no_calendar_call() {
        let calendar = MockCalendarService::new();

        for request in [
            ReservationRequest::default(),
            ReservationRequest {
                start_date_time: Some("  ".to_string()),
                ..Default::default()
            },
        ] {
            let result = book_reservation(&calendar, &gcal_config(), request).await;
            assert!(matches!(result, Err(GcalError::MissingStartDateTime)));
        }

        assert_eq!(calendar.list_calls(), 0);
        assert_eq!(calendar.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_free_slot_inserts_exactly_one_event() {
        let calendar = MockCalendarService::new();

        let result = book_reservation(&calendar, &gcal_config(), jane("2024-06-01T18:00:00+03:00"))
            .await
            .unwrap();

        assert!(result.event_id.is_some());
        assert_eq!(result.status, "confirmed");
        assert_eq!(calendar.list_calls(), 1);
        assert_eq!(calendar.insert_calls(), 1);

        let events = calendar.events(CALENDAR_ID);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Reservation: Jane (4 guests)");
        assert_eq!(events[0].start_time.to_rfc3339(), "2024-06-01T18:00:00+03:00");
        assert_eq!(events[0].end_time.to_rfc3339(), "2024-06-01T20:00:00+03:00");
    }

    #[tokio::test]
    async fn test_overlapping_event_is_a_conflict() {
        let calendar = MockCalendarService::new().with_event(
            CALENDAR_ID,
            existing_event("2024-06-01T19:30:00+03:00", "2024-06-01T21:00:00+03:00"),
        );

        let result =
            book_reservation(&calendar, &gcal_config(), jane("2024-06-01T18:00:00+03:00")).await;

        assert!(matches!(result, Err(GcalError::Conflict)));
        assert_eq!(calendar.insert_calls(), 0);
        assert_eq!(calendar.events(CALENDAR_ID).len(), 1);
    }

    #[tokio::test]
    async fn test_back_to_back_events_do_not_conflict() {
        let calendar = MockCalendarService::new()
            .with_event(
                CALENDAR_ID,
                existing_event("2024-06-01T16:00:00+03:00", "2024-06-01T18:00:00+03:00"),
            )
            .with_event(
                CALENDAR_ID,
                existing_event("2024-06-01T20:00:00+03:00", "2024-06-01T22:00:00+03:00"),
            );

        let result =
            book_reservation(&calendar, &gcal_config(), jane("2024-06-01T18:00:00+03:00")).await;

        assert!(result.is_ok());
        assert_eq!(calendar.insert_calls(), 1);
    }

    #[tokio::test]
    async fn test_same_request_twice_conflicts_the_second_time() {
        let calendar = MockCalendarService::new();
        let config = gcal_config();

        let first = book_reservation(&calendar, &config, jane("2024-06-01T18:00:00+03:00")).await;
        let second = book_reservation(&calendar, &config, jane("2024-06-01T18:00:00+03:00")).await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(GcalError::Conflict)));
        assert_eq!(calendar.insert_calls(), 1);
    }

    #[tokio::test]
    async fn test_calendar_failure_skips_insert() {
        let calendar = MockCalendarService::new();
        calendar.fail_with("invalid_grant: Invalid JWT Signature.");

        let result =
            book_reservation(&calendar, &gcal_config(), jane("2024-06-01T18:00:00+03:00")).await;

        assert!(matches!(result, Err(GcalError::ServiceError(_))));
        assert_eq!(calendar.list_calls(), 1);
        assert_eq!(calendar.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_start_fails_before_calendar_call() {
        let calendar = MockCalendarService::new();

        let result = book_reservation(&calendar, &gcal_config(), jane("next friday")).await;

        assert!(matches!(result, Err(GcalError::TimeParseError(_))));
        assert_eq!(calendar.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_calendar_id_is_a_config_error() {
        let calendar = MockCalendarService::new();
        let config = GcalConfig {
            calendar_id: None,
            ..gcal_config()
        };

        let result = book_reservation(&calendar, &config, jane("2024-06-01T18:00:00+03:00")).await;

        assert!(matches!(result, Err(GcalError::ConfigError(_))));
        assert_eq!(calendar.list_calls(), 0);
    }
}
