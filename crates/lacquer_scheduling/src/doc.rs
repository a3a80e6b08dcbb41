// File: crates/lacquer_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    AppointmentUpdateResponse, AppointmentView, AppointmentsQuery, AppointmentsResponse,
    AvailabilityQuery, AvailableSlotsResponse, BookSlotRequest, BookingResponse, ServiceSummary,
    ServicesResponse,
};
use crate::logic::TimeSlot;

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("date" = String, Query, description = "Date in YYYY-MM-DD format", example = "2025-05-05", format = "date"),
        ("service_id" = String, Query, description = "Id of the requested service", example = "manicure"),
        ("staff_id" = Option<String>, Query, description = "Optional staff member to check against")
    ),
    responses(
        (status = 200, description = "Candidate slots, blocked ones included", body = AvailableSlotsResponse),
        (status = 400, description = "Invalid date format", body = String),
        (status = 500, description = "Internal error", body = String)
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "Bookable services", body = ServicesResponse),
        (status = 500, description = "Internal error", body = String)
    )
)]
fn doc_list_services_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookSlotRequest, example = json!({
        "service_id": "manicure",
        "date": "2025-05-05",
        "time": "10:00",
        "client_name": "Mia",
        "client_email": "mia@example.com"
    })),
    responses(
        (status = 200, description = "Booking result", body = BookingResponse,
         example = json!({
             "success": true,
             "appointment_id": "7f1c9f0e-8d7b-4a5e-9a41-2a0cf8a6b90d",
             "staff_id": "anna",
             "message": "Appointment booked successfully."
         })
        ),
        (status = 409, description = "Slot already booked or no staff free",
         example = json!("This slot was just taken, please pick another time.")
        ),
        (status = 400, description = "Invalid request",
         example = json!("Invalid time format (HH:MM)")
        )
    )
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    patch,
    path = "/admin/appointments/{appointment_id}/confirm",
    params(
        ("appointment_id" = String, Path, description = "The ID of the appointment to confirm")
    ),
    responses(
        (status = 200, description = "Confirmation result", body = AppointmentUpdateResponse,
         example = json!({
             "success": true,
             "message": "Appointment confirmed."
         })
        ),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Appointment can no longer be confirmed")
    )
)]
fn doc_confirm_appointment_handler() {}

#[utoipa::path(
    patch,
    path = "/admin/appointments/{appointment_id}/cancel",
    params(
        ("appointment_id" = String, Path, description = "The ID of the appointment to cancel")
    ),
    responses(
        (status = 200, description = "Cancellation result", body = AppointmentUpdateResponse,
         example = json!({
             "success": true,
             "message": "Appointment marked as cancelled successfully."
         })
        ),
        (status = 404, description = "Appointment not found")
    )
)]
fn doc_cancel_appointment_handler() {}

#[utoipa::path(
    get,
    path = "/admin/appointments",
    params(
        ("start_date" = String, Query, description = "Start date in YYYY-MM-DD format", example = "2025-05-05", format = "date"),
        ("end_date" = String, Query, description = "End date in YYYY-MM-DD format", example = "2025-05-10", format = "date"),
        ("include_cancelled" = bool, Query, description = "Whether to include cancelled appointments", example = false)
    ),
    responses(
        (status = 200, description = "Appointments in the range", body = AppointmentsResponse),
        (status = 400, description = "Invalid date range", body = String)
    )
)]
fn doc_list_appointments_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_list_services_handler,
        doc_book_slot_handler,
        doc_confirm_appointment_handler,
        doc_cancel_appointment_handler,
        doc_list_appointments_handler
    ),
    components(
        schemas(
            TimeSlot,
            AvailabilityQuery,
            AvailableSlotsResponse,
            ServiceSummary,
            ServicesResponse,
            BookSlotRequest,
            BookingResponse,
            AppointmentUpdateResponse,
            AppointmentsQuery,
            AppointmentView,
            AppointmentsResponse
        )
    ),
    tags(
        (name = "scheduling", description = "Salon availability and booking API")
    ),
    servers(
        (url = "/api", description = "Main API prefix")
    )
)]
pub struct SchedulingApiDoc;
