// --- File: crates/services/lacquer_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module provides the ServiceFactory implementation for the backend
//! service: the in-memory appointment store, the seeded catalog/directory,
//! and, when enabled, the tracing-backed notifier that stands in for real
//! email delivery.

use lacquer_common::error::LacquerError;
use lacquer_common::services::{
    AppointmentStore, BoxFuture, BoxedError, NotificationResult, NotificationService,
    ServiceCatalog, ServiceFactory, StaffDirectory,
};
use lacquer_config::AppConfig;
use lacquer_store::{InMemoryAppointmentStore, SeededDirectory};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Factory wiring the concrete services from configuration.
pub struct LacquerServiceFactory {
    store: Arc<dyn AppointmentStore<Error = BoxedError>>,
    catalog: Arc<dyn ServiceCatalog<Error = BoxedError>>,
    staff: Arc<dyn StaffDirectory<Error = BoxedError>>,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl LacquerServiceFactory {
    /// Create a new service factory. Fails when the configured seeds are
    /// inconsistent (duplicate ids, unknown service references).
    pub fn new(config: Arc<AppConfig>) -> Result<Self, LacquerError> {
        info!("Initialising in-memory appointment store...");
        let store = Arc::new(InMemoryAppointmentStore::new());

        let directory = Arc::new(SeededDirectory::from_config(&config)?);
        info!("Service catalog and staff directory seeded from configuration.");

        let notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>> =
            if config.use_notifier {
                info!("Booking notifier enabled (tracing transport).");
                Some(Arc::new(TracingNotifier))
            } else {
                info!("Booking notifier disabled via runtime config.");
                None
            };

        Ok(Self {
            store,
            catalog: directory.clone(),
            staff: directory,
            notifier,
        })
    }
}

impl ServiceFactory for LacquerServiceFactory {
    fn appointment_store(&self) -> Option<Arc<dyn AppointmentStore<Error = BoxedError>>> {
        Some(self.store.clone())
    }

    fn service_catalog(&self) -> Option<Arc<dyn ServiceCatalog<Error = BoxedError>>> {
        Some(self.catalog.clone())
    }

    fn staff_directory(&self) -> Option<Arc<dyn StaffDirectory<Error = BoxedError>>> {
        Some(self.staff.clone())
    }

    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        self.notifier.clone()
    }
}

/// Notifier that writes the outgoing message to the log instead of a mail
/// transport. Delivery of real email lives outside this service.
struct TracingNotifier;

impl NotificationService for TracingNotifier {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        _is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        Box::pin(async move {
            info!("notification to {to}: {subject} - {body}");
            Ok(NotificationResult {
                id: Uuid::new_v4().to_string(),
                status: "sent".to_string(),
            })
        })
    }
}
