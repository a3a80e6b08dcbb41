// --- File: crates/lacquer_store/src/memory.rs ---
//! In-memory appointment store.
//!
//! Reference implementation of the `AppointmentStore` boundary. All records
//! live behind a single async mutex; `insert_appointment` runs its overlap
//! check and the insert under the same lock, which is what rejects the
//! second of two concurrent bookings for the same staff interval.

use chrono::{DateTime, Utc};
use lacquer_common::services::{
    Appointment, AppointmentStatus, AppointmentStore, BookingOutcome, BoxFuture, BoxedError,
    NewAppointment,
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;

/// Appointment store keeping every record in process memory.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn intersects(appointment: &Appointment, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    appointment.start_time < to && appointment.end_time > from
}

impl AppointmentStore for InMemoryAppointmentStore {
    type Error = BoxedError;

    fn appointments_in_span(
        &self,
        staff_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Appointment>, Self::Error> {
        let staff_id = staff_id.to_string();
        Box::pin(async move {
            let appointments = self.appointments.lock().await;
            Ok(appointments
                .iter()
                .filter(|a| {
                    a.staff_id == staff_id && a.status.blocks_slots() && intersects(a, from, to)
                })
                .cloned()
                .collect())
        })
    }

    fn list_appointments(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Appointment>, Self::Error> {
        Box::pin(async move {
            let appointments = self.appointments.lock().await;
            let mut listed: Vec<Appointment> = appointments
                .iter()
                .filter(|a| (include_cancelled || a.status.blocks_slots()) && intersects(a, from, to))
                .cloned()
                .collect();
            listed.sort_by_key(|a| a.start_time);
            Ok(listed)
        })
    }

    fn insert_appointment(
        &self,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, BookingOutcome, Self::Error> {
        Box::pin(async move {
            // Check and insert happen under one lock so concurrent bookings
            // for the same staff member serialise.
            let mut appointments = self.appointments.lock().await;
            let taken = appointments.iter().any(|a| {
                a.staff_id == appointment.staff_id
                    && a.status.blocks_slots()
                    && intersects(a, appointment.start_time, appointment.end_time)
            });
            if taken {
                debug!(
                    "rejecting overlapping insert for staff {} at {}",
                    appointment.staff_id, appointment.start_time
                );
                return Ok(BookingOutcome::SlotTaken);
            }
            let now = Utc::now();
            let record = Appointment {
                id: Uuid::new_v4().to_string(),
                staff_id: appointment.staff_id,
                service_id: appointment.service_id,
                client_name: appointment.client_name,
                client_email: appointment.client_email,
                notes: appointment.notes,
                start_time: appointment.start_time,
                end_time: appointment.end_time,
                status: AppointmentStatus::Pending,
                created: now,
                updated: now,
            };
            appointments.push(record.clone());
            Ok(BookingOutcome::Booked(record))
        })
    }

    fn confirm_appointment(
        &self,
        appointment_id: &str,
    ) -> BoxFuture<'_, Option<Appointment>, Self::Error> {
        let appointment_id = appointment_id.to_string();
        Box::pin(async move {
            let mut appointments = self.appointments.lock().await;
            let Some(record) = appointments.iter_mut().find(|a| a.id == appointment_id) else {
                return Ok(None);
            };
            if record.status == AppointmentStatus::Cancelled {
                return Err(BoxedError(Box::new(StoreError::InvalidTransition {
                    id: record.id.clone(),
                    from: AppointmentStatus::Cancelled,
                    to: AppointmentStatus::Confirmed,
                })));
            }
            record.status = AppointmentStatus::Confirmed;
            record.updated = Utc::now();
            Ok(Some(record.clone()))
        })
    }

    fn cancel_appointment(
        &self,
        appointment_id: &str,
    ) -> BoxFuture<'_, Option<Appointment>, Self::Error> {
        let appointment_id = appointment_id.to_string();
        Box::pin(async move {
            let mut appointments = self.appointments.lock().await;
            let Some(record) = appointments.iter_mut().find(|a| a.id == appointment_id) else {
                return Ok(None);
            };
            record.status = AppointmentStatus::Cancelled;
            record.updated = Utc::now();
            Ok(Some(record.clone()))
        })
    }
}
