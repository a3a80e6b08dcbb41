// File: crates/lacquer_scheduling/src/handlers.rs
use crate::logic::{fits_window, SchedulingError, TimeSlot};
use crate::service::AvailabilityService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime};
use lacquer_common::error::HttpStatusCode;
use lacquer_common::services::{
    Appointment, AppointmentStore, BookingOutcome, BoxedError, NewAppointment,
    NotificationService, SalonService, ServiceCatalog, StaffDirectory,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// Define shared state needed by scheduling handlers
#[derive(Clone)]
pub struct SchedulingState {
    pub availability: Arc<AvailabilityService>,
    pub store: Arc<dyn AppointmentStore<Error = BoxedError>>,
    pub catalog: Arc<dyn ServiceCatalog<Error = BoxedError>>,
    pub staff: Arc<dyn StaffDirectory<Error = BoxedError>>,
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

// --- Data Structures ---
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailabilityQuery {
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Id of the requested service
    pub service_id: String,
    /// Optional staff member to check; without it slots carry no assignment
    pub staff_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableSlotsResponse {
    pub date: String,
    pub service_id: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServiceSummary {
    pub id: String,
    pub name: String,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<SalonService> for ServiceSummary {
    fn from(service: SalonService) -> Self {
        Self {
            id: service.id,
            name: service.name,
            duration_minutes: service.duration_minutes,
            price: service.price,
            currency: service.currency,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServicesResponse {
    pub services: Vec<ServiceSummary>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookSlotRequest {
    pub service_id: String,
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Start time in HH:MM format, salon-local
    pub time: String,
    /// Optional staff request; omitted means auto-assignment
    pub staff_id: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub appointment_id: Option<String>,
    pub staff_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppointmentUpdateResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppointmentsQuery {
    pub start_date: String,              // YYYY-MM-DD format
    pub end_date: String,                // YYYY-MM-DD format
    pub include_cancelled: Option<bool>, // Whether to include cancelled appointments
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppointmentView {
    pub appointment_id: String,
    pub staff_id: String,
    pub service_id: String,
    pub client_name: String,
    pub start_time: String, // ISO 8601 format
    pub end_time: String,   // ISO 8601 format
    pub status: String,     // "pending", "confirmed" or "cancelled"
    pub created: String,    // ISO 8601 format
    pub updated: String,    // ISO 8601 format
}

impl From<Appointment> for AppointmentView {
    fn from(appointment: Appointment) -> Self {
        Self {
            appointment_id: appointment.id,
            staff_id: appointment.staff_id,
            service_id: appointment.service_id,
            client_name: appointment.client_name,
            start_time: appointment.start_time.to_rfc3339(),
            end_time: appointment.end_time.to_rfc3339(),
            status: appointment.status.to_string(),
            created: appointment.created.to_rfc3339(),
            updated: appointment.updated.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentView>,
}

// --- Error Mapping ---

fn error_response(err: SchedulingError) -> (StatusCode, String) {
    info!("scheduling request failed: {err}");
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match &err {
        SchedulingError::Store(_) => "Failed to compute availability".to_string(),
        _ => err.to_string(),
    };
    (status, message)
}

fn store_error(err: BoxedError) -> (StatusCode, String) {
    info!("store request failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Storage error".to_string(),
    )
}

fn parse_date(value: &str) -> Result<NaiveDate, (StatusCode, String)> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })
}

// --- Handlers ---

/// Handler to get the slot grid for one day.
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, (StatusCode, String)> {
    let date = parse_date(&query.date)?;

    let slots = state
        .availability
        .available_slots(date, &query.service_id, query.staff_id.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(AvailableSlotsResponse {
        date: query.date,
        service_id: query.service_id,
        slots,
    }))
}

/// Handler to list the bookable services.
#[axum::debug_handler]
pub async fn list_services_handler(
    State(state): State<Arc<SchedulingState>>,
) -> Result<Json<ServicesResponse>, (StatusCode, String)> {
    let services = state.catalog.services().await.map_err(store_error)?;
    Ok(Json(ServicesResponse {
        services: services.into_iter().map(ServiceSummary::from).collect(),
    }))
}

/// Handler to book a time slot.
///
/// Re-checks the window and the staff conflict before inserting, but the
/// store's own overlap rejection is what finally decides a race between two
/// concurrent requests for the same slot.
#[axum::debug_handler]
pub async fn book_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    let date = parse_date(&payload.date)?;
    let time = NaiveTime::parse_from_str(&payload.time, "%H:%M").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid time format (HH:MM)".to_string(),
        )
    })?;
    if payload.client_name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "client_name must not be empty".to_string(),
        ));
    }

    let service = state
        .catalog
        .service(&payload.service_id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("No service offered with id {}", payload.service_id),
            )
        })?;

    let availability = &state.availability;
    let plan = availability.plan_for(&service);
    let Some(window) = availability.window_for(date) else {
        return Err((
            StatusCode::CONFLICT,
            "The salon is closed on the requested date.".to_string(),
        ));
    };
    if !fits_window(window, time, &plan) {
        return Err((
            StatusCode::CONFLICT,
            "The requested time does not fit within opening hours.".to_string(),
        ));
    }
    let span = availability
        .occupied_span(date, time, &plan)
        .map_err(error_response)?;

    let staff_id = match payload.staff_id {
        Some(requested) => {
            let member = state
                .staff
                .staff_member(&requested)
                .await
                .map_err(store_error)?
                .ok_or_else(|| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Unknown staff member: {requested}"),
                    )
                })?;
            if !member.services.iter().any(|id| id == &payload.service_id) {
                return Err((
                    StatusCode::BAD_REQUEST,
                    format!("{} does not offer this service", member.name),
                ));
            }
            if !availability
                .is_staff_free(&member.id, span)
                .await
                .map_err(error_response)?
            {
                return Err((
                    StatusCode::CONFLICT,
                    "Requested time slot is no longer available.".to_string(),
                ));
            }
            member.id
        }
        None => availability
            .find_available_staff(&payload.service_id, date, time)
            .await
            .map_err(error_response)?
            .ok_or_else(|| {
                (
                    StatusCode::CONFLICT,
                    "No staff member is available at the requested time. Please choose a different time."
                        .to_string(),
                )
            })?,
    };

    // The stored interval is the treatment itself; buffers only widen the
    // slot side of the conflict check.
    let start_time = span.0 + plan.lead_buffer;
    let end_time = start_time + plan.duration;
    let outcome = state
        .store
        .insert_appointment(NewAppointment {
            staff_id: staff_id.clone(),
            service_id: payload.service_id,
            client_name: payload.client_name,
            client_email: payload.client_email,
            notes: payload.notes,
            start_time,
            end_time,
        })
        .await
        .map_err(store_error)?;

    match outcome {
        BookingOutcome::SlotTaken => Err((
            StatusCode::CONFLICT,
            "This slot was just taken, please pick another time.".to_string(),
        )),
        BookingOutcome::Booked(appointment) => {
            info!(
                "booked appointment {} with {} at {}",
                appointment.id, staff_id, appointment.start_time
            );
            notify_booked(&state, &appointment).await;
            Ok(Json(BookingResponse {
                success: true,
                appointment_id: Some(appointment.id),
                staff_id: Some(staff_id),
                message: "Appointment booked successfully.".to_string(),
            }))
        }
    }
}

/// Sends the booking confirmation. Best-effort: failures are logged, never
/// surfaced to the client.
async fn notify_booked(state: &SchedulingState, appointment: &Appointment) {
    let (Some(notifier), Some(email)) = (&state.notifier, &appointment.client_email) else {
        return;
    };
    let body = format!(
        "Hi {}, your appointment on {} is booked.",
        appointment.client_name, appointment.start_time
    );
    if let Err(err) = notifier
        .send_email(email, "Your appointment is booked", &body, false)
        .await
    {
        warn!("failed to send booking confirmation: {err}");
    }
}

/// Handler to confirm a pending appointment.
#[axum::debug_handler]
pub async fn confirm_appointment_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<AppointmentUpdateResponse>, (StatusCode, String)> {
    match state.store.confirm_appointment(&appointment_id).await {
        Ok(Some(_)) => Ok(Json(AppointmentUpdateResponse {
            success: true,
            message: "Appointment confirmed.".to_string(),
        })),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Appointment not found.".to_string())),
        Err(err) => {
            info!("Error confirming appointment: {err}");
            Err((
                StatusCode::CONFLICT,
                "Appointment can no longer be confirmed.".to_string(),
            ))
        }
    }
}

/// Handler to mark an appointment as cancelled without deleting it.
#[axum::debug_handler]
pub async fn cancel_appointment_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<AppointmentUpdateResponse>, (StatusCode, String)> {
    match state.store.cancel_appointment(&appointment_id).await {
        Ok(Some(_)) => Ok(Json(AppointmentUpdateResponse {
            success: true,
            message: "Appointment marked as cancelled successfully.".to_string(),
        })),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Appointment not found.".to_string())),
        Err(err) => {
            info!("Error cancelling appointment: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to cancel appointment.".to_string(),
            ))
        }
    }
}

/// Handler to list appointments for the admin screen.
#[axum::debug_handler]
pub async fn list_appointments_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<AppointmentsResponse>, (StatusCode, String)> {
    let start_date = parse_date(&query.start_date)?;
    let end_date = parse_date(&query.end_date)?;
    if end_date < start_date {
        return Err((
            StatusCode::BAD_REQUEST,
            "end_date must be after start_date".to_string(),
        ));
    }

    let from = state
        .availability
        .local_day_span(start_date)
        .map_err(error_response)?
        .0;
    let to = state
        .availability
        .local_day_span(end_date)
        .map_err(error_response)?
        .1;

    let include_cancelled = query.include_cancelled.unwrap_or(false);
    let appointments = state
        .store
        .list_appointments(from, to, include_cancelled)
        .await
        .map_err(store_error)?;

    Ok(Json(AppointmentsResponse {
        appointments: appointments.into_iter().map(AppointmentView::from).collect(),
    }))
}
