// --- File: crates/lacquer_store/src/error.rs ---
use lacquer_common::services::AppointmentStatus;
use thiserror::Error;

/// Errors produced by the appointment store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid status transition for appointment {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}
