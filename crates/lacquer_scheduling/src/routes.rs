// --- File: crates/lacquer_scheduling/src/routes.rs ---

use crate::handlers::{
    book_slot_handler, cancel_appointment_handler, confirm_appointment_handler,
    get_availability_handler, list_appointments_handler, list_services_handler, SchedulingState,
};
use crate::service::AvailabilityService;
use axum::{
    routing::{get, patch, post},
    Router,
};
use lacquer_common::services::ServiceFactory;
use lacquer_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the scheduling feature.
///
/// The factory must provide the appointment store, the service catalog and
/// the staff directory; the notifier is optional.
pub fn routes(config: Arc<AppConfig>, services: Arc<dyn ServiceFactory>) -> Router {
    let store = services
        .appointment_store()
        .expect("appointment store is required for scheduling routes");
    let catalog = services
        .service_catalog()
        .expect("service catalog is required for scheduling routes");
    let staff = services
        .staff_directory()
        .expect("staff directory is required for scheduling routes");

    let availability = Arc::new(AvailabilityService::new(
        &config,
        catalog.clone(),
        staff.clone(),
        store.clone(),
    ));
    let state = Arc::new(SchedulingState {
        availability,
        store,
        catalog,
        staff,
        notifier: services.notification_service(),
    });

    Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/services", get(list_services_handler))
        .route("/book", post(book_slot_handler))
        .route(
            "/admin/appointments/{appointment_id}/confirm",
            patch(confirm_appointment_handler),
        )
        .route(
            "/admin/appointments/{appointment_id}/cancel",
            patch(cancel_appointment_handler),
        )
        .route("/admin/appointments", get(list_appointments_handler))
        .with_state(state)
}
