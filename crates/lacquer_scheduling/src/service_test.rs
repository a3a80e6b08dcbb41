#[cfg(test)]
mod tests {
    use crate::service::AvailabilityService;
    use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
    use lacquer_common::services::{AppointmentStore, BookingOutcome, NewAppointment};
    use lacquer_config::{
        AppConfig, DayHours, SchedulingConfig, ServiceEntry, StaffEntry,
    };
    use lacquer_store::{InMemoryAppointmentStore, SeededDirectory};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn open_day() -> DayHours {
        DayHours {
            open: true,
            start: Some("09:00".to_string()),
            end: Some("18:00".to_string()),
        }
    }

    fn service_entry(id: &str, duration_minutes: i64) -> ServiceEntry {
        ServiceEntry {
            id: id.to_string(),
            name: id.to_string(),
            duration_minutes,
            price: None,
            currency: None,
        }
    }

    fn staff_entry(id: &str, services: &[&str]) -> StaffEntry {
        StaffEntry {
            id: id.to_string(),
            name: id.to_string(),
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn test_config() -> AppConfig {
        let mut business_hours = HashMap::new();
        for day in ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday"] {
            business_hours.insert(day.to_string(), open_day());
        }
        business_hours.insert(
            "sunday".to_string(),
            DayHours {
                open: false,
                start: None,
                end: None,
            },
        );
        AppConfig {
            use_notifier: false,
            scheduling: Some(SchedulingConfig {
                time_zone: Some("UTC".to_string()),
                granularity_minutes: 15,
                buffer_before_minutes: 0,
                buffer_after_minutes: 15,
            }),
            business_hours: Some(business_hours),
            services: Some(vec![
                service_entry("manicure", 60),
                service_entry("gel", 45),
                service_entry("pedicure", 30),
            ]),
            staff: Some(vec![
                staff_entry("anna", &["manicure", "gel"]),
                staff_entry("bea", &["manicure"]),
            ]),
            ..AppConfig::default()
        }
    }

    fn service_under_test(store: Arc<InMemoryAppointmentStore>) -> AvailabilityService {
        let config = test_config();
        let directory = Arc::new(SeededDirectory::from_config(&config).unwrap());
        AvailabilityService::new(&config, directory.clone(), directory, store)
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 4).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, hour, minute, 0).unwrap()
    }

    async fn book(
        store: &InMemoryAppointmentStore,
        staff_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> String {
        match store
            .insert_appointment(NewAppointment {
                staff_id: staff_id.to_string(),
                service_id: "manicure".to_string(),
                client_name: "Mia".to_string(),
                client_email: None,
                notes: None,
                start_time: start,
                end_time: end,
            })
            .await
            .unwrap()
        {
            BookingOutcome::Booked(appointment) => appointment.id,
            BookingOutcome::SlotTaken => panic!("expected the slot to be free"),
        }
    }

    #[tokio::test]
    async fn closed_day_yields_no_slots() {
        let service = service_under_test(Arc::new(InMemoryAppointmentStore::new()));
        let slots = service
            .available_slots(sunday(), "manicure", Some("anna"))
            .await
            .unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn unknown_service_yields_no_slots() {
        let service = service_under_test(Arc::new(InMemoryAppointmentStore::new()));
        let slots = service
            .available_slots(monday(), "waxing", None)
            .await
            .unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn slots_without_staff_are_unassigned_and_available() {
        let service = service_under_test(Arc::new(InMemoryAppointmentStore::new()));
        let slots = service
            .available_slots(monday(), "manicure", None)
            .await
            .unwrap();
        assert_eq!(slots.len(), 32);
        assert!(slots.iter().all(|s| s.available && s.staff_id.is_none()));
    }

    #[tokio::test]
    async fn booked_interval_blocks_intersecting_slots() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let id = book(&store, "anna", at(10, 0), at(11, 15)).await;
        store.confirm_appointment(&id).await.unwrap();

        let service = service_under_test(store);
        let slots = service
            .available_slots(monday(), "manicure", Some("anna"))
            .await
            .unwrap();
        assert_eq!(slots.len(), 32);
        for slot in &slots {
            assert_eq!(slot.staff_id.as_deref(), Some("anna"));
            let minutes = i64::from(slot.hour) * 60 + i64::from(slot.minute);
            // spans are [start, start + 75min) against [10:00, 11:15)
            let expected_blocked = (540..=660).contains(&minutes);
            assert_eq!(
                slot.available,
                !expected_blocked,
                "slot {:02}:{:02}",
                slot.hour,
                slot.minute
            );
        }
    }

    #[tokio::test]
    async fn other_staff_members_are_unaffected() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        book(&store, "anna", at(10, 0), at(11, 15)).await;

        let service = service_under_test(store);
        let slots = service
            .available_slots(monday(), "manicure", Some("bea"))
            .await
            .unwrap();
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn cancelled_appointments_free_their_slots() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let id = book(&store, "anna", at(10, 0), at(11, 15)).await;
        store.cancel_appointment(&id).await.unwrap();

        let service = service_under_test(store);
        let slots = service
            .available_slots(monday(), "manicure", Some("anna"))
            .await
            .unwrap();
        assert!(slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn auto_assign_returns_the_first_free_staff_member() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        let service = service_under_test(store.clone());
        let two_pm = NaiveTime::from_hms_opt(14, 0, 0).unwrap();

        // both free: the directory order decides
        let assigned = service
            .find_available_staff("manicure", monday(), two_pm)
            .await
            .unwrap();
        assert_eq!(assigned.as_deref(), Some("anna"));

        // anna busy at 14:00: bea takes over
        book(&store, "anna", at(14, 0), at(15, 0)).await;
        let assigned = service
            .find_available_staff("manicure", monday(), two_pm)
            .await
            .unwrap();
        assert_eq!(assigned.as_deref(), Some("bea"));

        // both busy: no assignment possible
        book(&store, "bea", at(14, 30), at(15, 0)).await;
        let assigned = service
            .find_available_staff("manicure", monday(), two_pm)
            .await
            .unwrap();
        assert!(assigned.is_none());
    }

    #[tokio::test]
    async fn auto_assign_only_considers_qualified_staff() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        // bea is free but not qualified for gel
        book(&store, "anna", at(14, 0), at(15, 0)).await;

        let service = service_under_test(store);
        let assigned = service
            .find_available_staff("gel", monday(), NaiveTime::from_hms_opt(14, 0, 0).unwrap())
            .await
            .unwrap();
        assert!(assigned.is_none());
    }

    #[tokio::test]
    async fn auto_assign_with_no_qualified_staff_is_a_normal_none() {
        let service = service_under_test(Arc::new(InMemoryAppointmentStore::new()));
        let assigned = service
            .find_available_staff(
                "pedicure",
                monday(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        assert!(assigned.is_none());
    }

    #[tokio::test]
    async fn a_slot_starting_at_an_appointment_end_is_free() {
        let store = Arc::new(InMemoryAppointmentStore::new());
        book(&store, "anna", at(10, 0), at(11, 15)).await;

        let service = service_under_test(store);
        // [11:15, 12:30) touches [10:00, 11:15) without sharing an instant
        let free = service
            .is_staff_free("anna", (at(11, 15), at(12, 30)))
            .await
            .unwrap();
        assert!(free);
    }
}
