// --- File: crates/lacquer_scheduling/src/hours.rs ---
//! Working-hours resolution.
//!
//! Maps a calendar date to the salon's opening window for that weekday.
//! Anything that cannot be resolved cleanly (missing weekday, `open = false`,
//! malformed or inverted times) resolves to closed.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use lacquer_config::DayHours;
use std::collections::HashMap;
use tracing::warn;

/// The open window of one day, as local wall-clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Opening windows per weekday, parsed once from configuration.
#[derive(Debug, Clone, Default)]
pub struct WeeklyHours {
    days: HashMap<Weekday, DayWindow>,
}

impl WeeklyHours {
    /// Parses the configured business hours. Days that fail to parse are
    /// logged and treated as closed.
    pub fn from_config(hours: &HashMap<String, DayHours>) -> Self {
        let mut days = HashMap::new();
        for (name, entry) in hours {
            let Some(weekday) = weekday_from_name(name) else {
                warn!("ignoring unknown weekday {name:?} in business hours");
                continue;
            };
            if !entry.open {
                continue;
            }
            match (
                parse_hhmm(entry.start.as_deref()),
                parse_hhmm(entry.end.as_deref()),
            ) {
                (Some(start), Some(end)) if start < end => {
                    days.insert(weekday, DayWindow { start, end });
                }
                _ => warn!("business hours for {name} are malformed, treating the day as closed"),
            }
        }
        Self { days }
    }

    /// The open window for `date`, or `None` when the salon is closed.
    pub fn resolve(&self, date: NaiveDate) -> Option<DayWindow> {
        self.days.get(&date.weekday()).copied()
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_hhmm(value: Option<&str>) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value?, "%H:%M").ok()
}
