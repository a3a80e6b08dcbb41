// --- File: crates/services/lacquer_backend/src/app_state.rs ---
use lacquer_common::error::LacquerError;
use lacquer_common::services::ServiceFactory;
use lacquer_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::LacquerServiceFactory;

/// Application state that is shared across all routes.
///
/// Keeps the loaded configuration and the service factory together so route
/// builders receive their dependencies from one place instead of reading
/// ambient state.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// Service factory for accessing the store, catalog, directory and
    /// notifier.
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    /// Create a new AppState with the given configuration.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, LacquerError> {
        let service_factory = Arc::new(LacquerServiceFactory::new(config.clone())?);
        Ok(Self {
            config,
            service_factory,
        })
    }
}
