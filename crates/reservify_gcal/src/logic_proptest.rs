#[cfg(test)]
mod tests {
    use crate::logic::{build_reservation_event, BookingWindow, ReservationRequest};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use proptest::prelude::*;

    // Any instant between 2000 and 2100 in any whole-quarter-hour offset.
    fn arb_start() -> impl Strategy<Value = DateTime<FixedOffset>> {
        (946_684_800i64..4_102_444_800i64, -48i32..=56i32).prop_map(|(secs, quarters)| {
            let offset = FixedOffset::east_opt(quarters * 15 * 60).unwrap();
            offset.timestamp_opt(secs, 0).unwrap()
        })
    }

    proptest! {
        // The slot is always exactly two hours and reads in the request's offset
        #[test]
        fn test_window_is_always_two_hours(start in arb_start()) {
            let window = BookingWindow::starting_at(start);

            prop_assert_eq!(window.end - window.start, Duration::hours(2));
            prop_assert_eq!(window.start, start);
            prop_assert_eq!(window.end.offset(), start.offset());
            prop_assert_eq!(window.end_utc() - window.start_utc(), Duration::hours(2));
        }

        // The summary always carries the party size, or N/A when there is none
        #[test]
        fn test_summary_embeds_party_size(
            start in arb_start(),
            name in "[A-Za-z]{1,12}",
            party_size in proptest::option::of(0u32..40),
        ) {
            let request = ReservationRequest {
                name: Some(name.clone()),
                party_size,
                ..Default::default()
            };
            let window = BookingWindow::starting_at(start);

            let event = build_reservation_event(&request, &window, "Europe/Riga");

            let expected_size = match party_size {
                Some(size) if size > 0 => size.to_string(),
                _ => "N/A".to_string(),
            };
            prop_assert_eq!(
                event.summary,
                format!("Reservation: {} ({} guests)", name, expected_size)
            );
            prop_assert_eq!(event.start_time, window.start);
            prop_assert_eq!(event.end_time, window.end);
        }
    }
}
