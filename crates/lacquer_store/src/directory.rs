// --- File: crates/lacquer_store/src/directory.rs ---
//! Seeded service catalog and staff directory.
//!
//! Both lookups are served from the validated configuration seeds. The
//! qualification order of `staff_for_service` is the order of the `staff`
//! list in the configuration, which makes auto-assignment deterministic.

use lacquer_common::error::{config_error, validation_error, LacquerError};
use lacquer_common::services::{
    BoxFuture, BoxedError, SalonService, ServiceCatalog, StaffDirectory, StaffMember,
};
use lacquer_config::AppConfig;
use std::collections::HashSet;

/// Catalog and directory backed by configuration seed lists.
pub struct SeededDirectory {
    services: Vec<SalonService>,
    staff: Vec<StaffMember>,
}

impl SeededDirectory {
    /// Builds the directory from configuration, validating the seeds.
    pub fn from_config(config: &AppConfig) -> Result<Self, LacquerError> {
        let services: Vec<SalonService> = config
            .services
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|entry| SalonService {
                id: entry.id,
                name: entry.name,
                duration_minutes: entry.duration_minutes,
                price: entry.price,
                currency: entry.currency,
            })
            .collect();

        let mut known_services = HashSet::new();
        for service in &services {
            if service.duration_minutes <= 0 {
                return Err(validation_error(format!(
                    "service {} must have a positive duration",
                    service.id
                )));
            }
            if !known_services.insert(service.id.clone()) {
                return Err(validation_error(format!(
                    "duplicate service id: {}",
                    service.id
                )));
            }
        }

        let staff: Vec<StaffMember> = config
            .staff
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|entry| StaffMember {
                id: entry.id,
                name: entry.name,
                services: entry.services,
            })
            .collect();

        let mut known_staff = HashSet::new();
        for member in &staff {
            if !known_staff.insert(member.id.clone()) {
                return Err(validation_error(format!("duplicate staff id: {}", member.id)));
            }
            for service_id in &member.services {
                if !known_services.contains(service_id) {
                    return Err(config_error(format!(
                        "staff member {} references unknown service {}",
                        member.id, service_id
                    )));
                }
            }
        }

        Ok(Self { services, staff })
    }
}

impl ServiceCatalog for SeededDirectory {
    type Error = BoxedError;

    fn service(&self, service_id: &str) -> BoxFuture<'_, Option<SalonService>, Self::Error> {
        let service_id = service_id.to_string();
        Box::pin(async move {
            Ok(self
                .services
                .iter()
                .find(|service| service.id == service_id)
                .cloned())
        })
    }

    fn services(&self) -> BoxFuture<'_, Vec<SalonService>, Self::Error> {
        Box::pin(async move { Ok(self.services.clone()) })
    }
}

impl StaffDirectory for SeededDirectory {
    type Error = BoxedError;

    fn staff_for_service(
        &self,
        service_id: &str,
    ) -> BoxFuture<'_, Vec<StaffMember>, Self::Error> {
        let service_id = service_id.to_string();
        Box::pin(async move {
            Ok(self
                .staff
                .iter()
                .filter(|member| member.services.iter().any(|id| id == &service_id))
                .cloned()
                .collect())
        })
    }

    fn staff_member(&self, staff_id: &str) -> BoxFuture<'_, Option<StaffMember>, Self::Error> {
        let staff_id = staff_id.to_string();
        Box::pin(async move {
            Ok(self
                .staff
                .iter()
                .find(|member| member.id == staff_id)
                .cloned())
        })
    }
}
