// --- File: crates/lacquer_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

// --- Business Hours Config ---
// Keyed by lowercase weekday name ("monday" .. "sunday").
// A day with `open = false`, a missing day, or malformed times all count as closed.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayHours {
    pub open: bool,
    /// Opening time as "HH:MM". Ignored when `open` is false.
    #[serde(default)]
    pub start: Option<String>,
    /// Closing time as "HH:MM". Must be after `start`.
    #[serde(default)]
    pub end: Option<String>,
}

// --- Scheduling Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// IANA time zone the salon operates in, e.g. "Europe/Zurich".
    /// Falls back to UTC when missing or unknown.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Step between candidate slot start times, in minutes.
    #[serde(default = "default_granularity")]
    pub granularity_minutes: i64,
    /// Idle minutes reserved before each appointment.
    #[serde(default)]
    pub buffer_before_minutes: i64,
    /// Idle minutes reserved after each appointment.
    #[serde(default)]
    pub buffer_after_minutes: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            time_zone: None,
            granularity_minutes: default_granularity(),
            buffer_before_minutes: 0,
            buffer_after_minutes: 0,
        }
    }
}

fn default_granularity() -> i64 {
    15
}

// --- Service Catalog Seed ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceEntry {
    pub id: String,
    pub name: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

// --- Staff Seed ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StaffEntry {
    pub id: String,
    pub name: String,
    /// Ids of the services this staff member is qualified for,
    /// in assignment preference order.
    #[serde(default)]
    pub services: Vec<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_notifier: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub scheduling: Option<SchedulingConfig>,
    #[serde(default)]
    pub business_hours: Option<HashMap<String, DayHours>>,
    #[serde(default)]
    pub services: Option<Vec<ServiceEntry>>,
    #[serde(default)]
    pub staff: Option<Vec<StaffEntry>>,
}
