// --- File: crates/lacquer_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! This module provides trait definitions for the capabilities the booking
//! core depends on: the appointment store, the service catalog, the staff
//! directory, and the notification sender. These traits allow for dependency
//! injection and easier testing by decoupling the availability and booking
//! logic from specific implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Lifecycle state of an appointment.
///
/// Only `Pending` and `Confirmed` appointments block time slots; a
/// `Cancelled` appointment is inert for every availability computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether an appointment in this state occupies its time interval.
    pub fn blocks_slots(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// A stored appointment. The interval is half-open: `[start_time, end_time)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub staff_id: String,
    pub service_id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Payload for creating an appointment. The store assigns id, status and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub staff_id: String,
    pub service_id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Result of an insert attempt.
///
/// A lost booking race is a normal business outcome, not an error, so it is
/// part of the success value and survives erasure behind `BoxedError` trait
/// objects.
#[derive(Debug)]
pub enum BookingOutcome {
    Booked(Appointment),
    SlotTaken,
}

/// A bookable salon service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonService {
    pub id: String,
    pub name: String,
    pub duration_minutes: i64,
    pub price: Option<i64>,
    pub currency: Option<String>,
}

/// A staff member and the services they are qualified for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub services: Vec<String>,
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// The ID of the notification.
    pub id: String,
    /// The status of the notification.
    pub status: String,
}

/// A trait for appointment storage operations.
///
/// Implementations MUST serialise the overlap check and the insert in
/// `insert_appointment`: a second insert whose interval overlaps an existing
/// non-cancelled appointment for the same staff member has to be rejected
/// with `BookingOutcome::SlotTaken`. The availability computation alone
/// cannot close the check-then-act race between concurrent bookings.
pub trait AppointmentStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: StdError + Send + Sync + 'static;

    /// Get the non-cancelled appointments for one staff member whose
    /// intervals intersect `[from, to)`.
    fn appointments_in_span(
        &self,
        staff_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Appointment>, Self::Error>;

    /// List appointments across all staff whose intervals intersect
    /// `[from, to)`, optionally including cancelled ones.
    fn list_appointments(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Appointment>, Self::Error>;

    /// Insert an appointment, rejecting overlaps for the same staff member.
    fn insert_appointment(
        &self,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, BookingOutcome, Self::Error>;

    /// Move a pending appointment to confirmed. Returns `None` when the id
    /// is unknown.
    fn confirm_appointment(
        &self,
        appointment_id: &str,
    ) -> BoxFuture<'_, Option<Appointment>, Self::Error>;

    /// Mark an appointment as cancelled without deleting it. Returns `None`
    /// when the id is unknown.
    fn cancel_appointment(
        &self,
        appointment_id: &str,
    ) -> BoxFuture<'_, Option<Appointment>, Self::Error>;
}

/// A trait for looking up bookable services.
pub trait ServiceCatalog: Send + Sync {
    /// Error type returned by catalog operations.
    type Error: StdError + Send + Sync + 'static;

    /// Look up one service by id.
    fn service(&self, service_id: &str) -> BoxFuture<'_, Option<SalonService>, Self::Error>;

    /// List every bookable service.
    fn services(&self) -> BoxFuture<'_, Vec<SalonService>, Self::Error>;
}

/// A trait for staff qualification lookups.
pub trait StaffDirectory: Send + Sync {
    /// Error type returned by directory operations.
    type Error: StdError + Send + Sync + 'static;

    /// Staff members qualified for a service, in assignment preference
    /// order. Order is deterministic within one call.
    fn staff_for_service(&self, service_id: &str)
        -> BoxFuture<'_, Vec<StaffMember>, Self::Error>;

    /// Look up one staff member by id.
    fn staff_member(&self, staff_id: &str) -> BoxFuture<'_, Option<StaffMember>, Self::Error>;
}

/// A trait for notification service operations.
///
/// Delivery is one-shot and best-effort; the booking flow never fails
/// because a notification could not be sent.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Send an email notification.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of the services the
/// application needs. Returning `None` means the capability is not
/// configured.
pub trait ServiceFactory: Send + Sync {
    /// Get the appointment store instance.
    fn appointment_store(&self) -> Option<Arc<dyn AppointmentStore<Error = BoxedError>>>;

    /// Get the service catalog instance.
    fn service_catalog(&self) -> Option<Arc<dyn ServiceCatalog<Error = BoxedError>>>;

    /// Get the staff directory instance.
    fn staff_directory(&self) -> Option<Arc<dyn StaffDirectory<Error = BoxedError>>>;

    /// Get a notification service instance.
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>>;
}
