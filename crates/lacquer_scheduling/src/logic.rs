// --- File: crates/lacquer_scheduling/src/logic.rs ---
//! Slot generation and conflict detection.
//!
//! Everything in this module is a pure function of its inputs: the same
//! window, plan and appointments always produce the same result. The
//! composition with stores and time zones lives in `service`.

use crate::hours::DayWindow;
use chrono::{DateTime, Duration, Timelike, Utc};
use lacquer_common::services::{Appointment, BoxedError};
use serde::Serialize;
use thiserror::Error;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Failed to parse time: {0}")]
    TimeParse(String),
    #[error("Local time {0} does not exist in time zone {1}")]
    InvalidLocalTime(String, String),
    #[error("Unknown service: {0}")]
    UnknownService(String),
    #[error("Store error: {0}")]
    Store(#[from] BoxedError),
}

/// One candidate appointment start time at the generation granularity.
///
/// Produced fresh for every availability request; the conflict pass is the
/// only thing that flips `available` after construction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimeSlot {
    #[cfg_attr(feature = "openapi", schema(example = 9))]
    pub hour: u32,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub minute: u32,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
}

/// Slot layout for one service: the treatment duration plus the idle
/// buffers reserved around it, and the generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlan {
    pub duration: Duration,
    /// Idle time reserved before the treatment starts.
    pub lead_buffer: Duration,
    /// Idle time reserved after the treatment ends.
    pub tail_buffer: Duration,
    pub step: Duration,
}

impl SlotPlan {
    /// The full interval a slot occupies, buffers included.
    pub fn total_span(&self) -> Duration {
        self.lead_buffer + self.duration + self.tail_buffer
    }
}

fn minutes_of_day(time: chrono::NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Generates the ordered candidate slots for one open window.
///
/// Candidates start at the window opening and step by `plan.step`. A
/// candidate survives iff its occupied span
/// `[start - lead, start + duration + tail)` fits entirely inside the
/// window, so the last slot's buffered end never passes closing time.
/// Every produced slot is available and unassigned.
pub fn generate_slots(window: DayWindow, plan: &SlotPlan) -> Vec<TimeSlot> {
    let step = plan.step.num_minutes();
    let total = plan.total_span().num_minutes();
    if step <= 0 || total <= 0 {
        return Vec::new();
    }
    let open = minutes_of_day(window.start);
    let close = minutes_of_day(window.end);
    let lead = plan.lead_buffer.num_minutes();

    let mut slots = Vec::new();
    let mut start = open;
    loop {
        let span_start = start - lead;
        let span_end = span_start + total;
        if span_end > close {
            break;
        }
        if span_start >= open {
            slots.push(TimeSlot {
                hour: (start / 60) as u32,
                minute: (start % 60) as u32,
                available: true,
                staff_id: None,
            });
        }
        start += step;
    }
    slots
}

/// Half-open interval intersection: `[slot_start, slot_end)` against
/// `[appt_start, appt_end)`. Touching endpoints do not overlap.
pub fn overlaps(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    appt_start: DateTime<Utc>,
    appt_end: DateTime<Utc>,
) -> bool {
    slot_start < appt_end && slot_end > appt_start
}

/// Whether the occupied span collides with any appointment that still
/// blocks its interval. Cancelled appointments never count.
pub fn conflicts_with_any(
    span: (DateTime<Utc>, DateTime<Utc>),
    appointments: &[Appointment],
) -> bool {
    appointments
        .iter()
        .filter(|appointment| appointment.status.blocks_slots())
        .any(|appointment| overlaps(span.0, span.1, appointment.start_time, appointment.end_time))
}

/// Whether a requested start time fits the open window once the plan's
/// buffers are applied.
pub fn fits_window(window: DayWindow, time: chrono::NaiveTime, plan: &SlotPlan) -> bool {
    let start = minutes_of_day(time);
    let span_start = start - plan.lead_buffer.num_minutes();
    let span_end = span_start + plan.total_span().num_minutes();
    span_start >= minutes_of_day(window.start) && span_end <= minutes_of_day(window.end)
}
