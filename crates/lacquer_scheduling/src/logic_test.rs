#[cfg(test)]
mod tests {
    use crate::hours::DayWindow;
    use crate::logic::{conflicts_with_any, fits_window, generate_slots, overlaps, SlotPlan};
    use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
    use lacquer_common::services::{Appointment, AppointmentStatus};

    fn window(start: (u32, u32), end: (u32, u32)) -> DayWindow {
        DayWindow {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    fn plan(duration: i64, lead: i64, tail: i64, step: i64) -> SlotPlan {
        SlotPlan {
            duration: Duration::minutes(duration),
            lead_buffer: Duration::minutes(lead),
            tail_buffer: Duration::minutes(tail),
            step: Duration::minutes(step),
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, hour, minute, 0).unwrap()
    }

    fn appointment(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> Appointment {
        Appointment {
            id: "a1".to_string(),
            staff_id: "anna".to_string(),
            service_id: "manicure".to_string(),
            client_name: "Mia".to_string(),
            client_email: None,
            notes: None,
            start_time: start,
            end_time: end,
            status,
            created: start,
            updated: start,
        }
    }

    #[test]
    fn generates_the_documented_grid() {
        // 09:00-18:00, 60 minute treatment, 15 minute buffer after,
        // 15 minute granularity: first slot 09:00, last 16:45, never 17:00.
        let slots = generate_slots(window((9, 0), (18, 0)), &plan(60, 0, 15, 15));
        assert_eq!(slots.len(), 32);
        assert_eq!((slots[0].hour, slots[0].minute), (9, 0));
        let last = slots.last().unwrap();
        assert_eq!((last.hour, last.minute), (16, 45));
        assert!(!slots.iter().any(|s| s.hour == 17));
        assert!(slots.iter().all(|s| s.available && s.staff_id.is_none()));
    }

    #[test]
    fn minute_overflow_carries_into_the_hour() {
        let slots = generate_slots(window((9, 0), (11, 0)), &plan(30, 0, 0, 15));
        let starts: Vec<(u32, u32)> = slots.iter().map(|s| (s.hour, s.minute)).collect();
        assert!(starts.contains(&(10, 0)));
        assert_eq!(starts.last(), Some(&(10, 30)));
    }

    #[test]
    fn oversized_treatment_yields_no_slots() {
        assert!(generate_slots(window((9, 0), (10, 0)), &plan(90, 0, 0, 15)).is_empty());
        assert!(generate_slots(window((9, 0), (10, 0)), &plan(45, 0, 30, 15)).is_empty());
    }

    #[test]
    fn empty_window_yields_no_slots() {
        assert!(generate_slots(window((9, 0), (9, 0)), &plan(30, 0, 0, 15)).is_empty());
    }

    #[test]
    fn lead_buffer_pushes_the_first_slot_back() {
        let slots = generate_slots(window((9, 0), (12, 0)), &plan(60, 15, 0, 15));
        assert_eq!((slots[0].hour, slots[0].minute), (9, 15));
        // last start where [start-15, start+60) fits in [09:00, 12:00)
        let last = slots.last().unwrap();
        assert_eq!((last.hour, last.minute), (11, 0));
    }

    #[test]
    fn generation_is_deterministic() {
        let w = window((9, 0), (18, 0));
        let p = plan(45, 0, 10, 15);
        assert_eq!(generate_slots(w, &p), generate_slots(w, &p));
    }

    #[test]
    fn overlap_is_half_open() {
        // touching endpoints share no instant
        assert!(!overlaps(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(11, 0), at(12, 0), at(10, 0), at(11, 0)));
        // partial and full containment do overlap
        assert!(overlaps(at(9, 30), at(10, 30), at(10, 0), at(11, 0)));
        assert!(overlaps(at(10, 15), at(10, 45), at(10, 0), at(11, 0)));
        assert!(overlaps(at(9, 0), at(12, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn booked_morning_blocks_exactly_the_intersecting_spans() {
        // Confirmed appointment 10:00-11:15; slot spans are
        // [start, start + 75min). Conflicted starts are 09:00 through 11:00,
        // 11:15 onward is free again.
        let appointments = vec![appointment(at(10, 0), at(11, 15), AppointmentStatus::Confirmed)];
        let slots = generate_slots(window((9, 0), (18, 0)), &plan(60, 0, 15, 15));

        for slot in &slots {
            let start = at(slot.hour, slot.minute);
            let span = (start, start + Duration::minutes(75));
            let conflicted = conflicts_with_any(span, &appointments);
            let minutes = i64::from(slot.hour) * 60 + i64::from(slot.minute);
            let expected = (540..=660).contains(&minutes); // 09:00 ..= 11:00
            assert_eq!(
                conflicted, expected,
                "slot {:02}:{:02} conflict mismatch",
                slot.hour, slot.minute
            );
        }
    }

    #[test]
    fn cancelled_appointments_never_block() {
        let appointments = vec![appointment(at(10, 0), at(11, 15), AppointmentStatus::Cancelled)];
        let span = (at(10, 0), at(11, 15));
        assert!(!conflicts_with_any(span, &appointments));
    }

    #[test]
    fn pending_appointments_block_like_confirmed_ones() {
        let appointments = vec![appointment(at(10, 0), at(11, 0), AppointmentStatus::Pending)];
        assert!(conflicts_with_any((at(10, 30), at(11, 30)), &appointments));
    }

    #[test]
    fn fits_window_applies_the_buffers() {
        let w = window((9, 0), (18, 0));
        let p = plan(60, 0, 15, 15);
        assert!(fits_window(w, NaiveTime::from_hms_opt(16, 45, 0).unwrap(), &p));
        assert!(!fits_window(w, NaiveTime::from_hms_opt(17, 0, 0).unwrap(), &p));
        assert!(!fits_window(w, NaiveTime::from_hms_opt(8, 45, 0).unwrap(), &p));
    }
}
