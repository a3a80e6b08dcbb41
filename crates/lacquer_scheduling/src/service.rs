// --- File: crates/lacquer_scheduling/src/service.rs ---
//! Availability service and staff auto-assignment.
//!
//! Composes the working-hours resolver, the slot generator and the conflict
//! detector over the store/catalog/directory boundaries. The boundary calls
//! are the only suspension points; everything between them is the pure logic
//! from `logic`.

use crate::hours::{DayWindow, WeeklyHours};
use crate::logic::{conflicts_with_any, generate_slots, SchedulingError, SlotPlan, TimeSlot};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use lacquer_common::error::HttpStatusCode;
use lacquer_common::services::{
    AppointmentStore, BoxedError, SalonService, ServiceCatalog, StaffDirectory,
};
use lacquer_config::AppConfig;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::TimeParse(_) | SchedulingError::InvalidLocalTime(..) => 400,
            SchedulingError::UnknownService(_) => 404,
            SchedulingError::Store(_) => 500,
        }
    }
}

/// Computes availability and assigns staff for one salon.
///
/// Holds the parsed business settings as explicit values; nothing here reads
/// ambient state, so two instances with the same inputs behave identically.
pub struct AvailabilityService {
    hours: WeeklyHours,
    time_zone: Tz,
    step: Duration,
    lead_buffer: Duration,
    tail_buffer: Duration,
    catalog: Arc<dyn ServiceCatalog<Error = BoxedError>>,
    staff: Arc<dyn StaffDirectory<Error = BoxedError>>,
    store: Arc<dyn AppointmentStore<Error = BoxedError>>,
}

impl AvailabilityService {
    pub fn new(
        config: &AppConfig,
        catalog: Arc<dyn ServiceCatalog<Error = BoxedError>>,
        staff: Arc<dyn StaffDirectory<Error = BoxedError>>,
        store: Arc<dyn AppointmentStore<Error = BoxedError>>,
    ) -> Self {
        let scheduling = config.scheduling.clone().unwrap_or_default();
        let zone_name = scheduling.time_zone.as_deref().unwrap_or("UTC");
        let time_zone = Tz::from_str(zone_name).unwrap_or_else(|_| {
            warn!("unknown time zone {zone_name:?}, falling back to UTC");
            Tz::UTC
        });
        let hours = match &config.business_hours {
            Some(hours) => WeeklyHours::from_config(hours),
            None => {
                warn!("no business hours configured, every day resolves as closed");
                WeeklyHours::default()
            }
        };
        Self {
            hours,
            time_zone,
            step: Duration::minutes(scheduling.granularity_minutes.max(1)),
            lead_buffer: Duration::minutes(scheduling.buffer_before_minutes.max(0)),
            tail_buffer: Duration::minutes(scheduling.buffer_after_minutes.max(0)),
            catalog,
            staff,
            store,
        }
    }

    /// The open window for `date`, or `None` when the salon is closed.
    pub fn window_for(&self, date: NaiveDate) -> Option<DayWindow> {
        self.hours.resolve(date)
    }

    /// The slot layout for one service under the configured buffers.
    pub fn plan_for(&self, service: &SalonService) -> SlotPlan {
        SlotPlan {
            duration: Duration::minutes(service.duration_minutes),
            lead_buffer: self.lead_buffer,
            tail_buffer: self.tail_buffer,
            step: self.step,
        }
    }

    /// The UTC interval covered by one salon-local calendar day.
    pub fn local_day_span(
        &self,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), SchedulingError> {
        let next = date
            .succ_opt()
            .ok_or_else(|| SchedulingError::TimeParse(format!("date out of range: {date}")))?;
        Ok((
            self.local_to_utc(date, NaiveTime::MIN)?,
            self.local_to_utc(next, NaiveTime::MIN)?,
        ))
    }

    /// The UTC span a booking at `time` occupies, buffers included.
    pub fn occupied_span(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        plan: &SlotPlan,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), SchedulingError> {
        let start = self.local_to_utc(date, time)?;
        Ok((
            start - plan.lead_buffer,
            start + plan.duration + plan.tail_buffer,
        ))
    }

    fn local_to_utc(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<DateTime<Utc>, SchedulingError> {
        self.time_zone
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                SchedulingError::InvalidLocalTime(
                    date.and_time(time).to_string(),
                    self.time_zone.to_string(),
                )
            })
    }

    /// Computes the full candidate slot list for one day.
    ///
    /// A closed day or an unknown service yields an empty list, not an
    /// error. With a staff id the slots carry that id and `available`
    /// reflects the conflict check against the staff member's non-cancelled
    /// appointments; without one every generated slot is returned available
    /// and unassigned, and staff is resolved at booking time.
    pub async fn available_slots(
        &self,
        date: NaiveDate,
        service_id: &str,
        staff_id: Option<&str>,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        let Some(window) = self.hours.resolve(date) else {
            debug!("salon is closed on {date}");
            return Ok(Vec::new());
        };
        let Some(service) = self.catalog.service(service_id).await? else {
            warn!("availability requested for unknown service {service_id:?}");
            return Ok(Vec::new());
        };
        let plan = self.plan_for(&service);
        let mut slots = generate_slots(window, &plan);

        let Some(staff_id) = staff_id else {
            return Ok(slots);
        };
        let (day_start, day_end) = self.local_day_span(date)?;
        let appointments = self
            .store
            .appointments_in_span(staff_id, day_start, day_end)
            .await?;
        for slot in &mut slots {
            slot.staff_id = Some(staff_id.to_string());
            let Some(time) = NaiveTime::from_hms_opt(slot.hour, slot.minute, 0) else {
                slot.available = false;
                continue;
            };
            match self.occupied_span(date, time, &plan) {
                Ok(span) => slot.available = !conflicts_with_any(span, &appointments),
                // local time skipped by a DST transition
                Err(_) => slot.available = false,
            }
        }
        Ok(slots)
    }

    /// Single-slot form of the conflict check for one staff member.
    pub async fn is_staff_free(
        &self,
        staff_id: &str,
        span: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<bool, SchedulingError> {
        let appointments = self.store.appointments_in_span(staff_id, span.0, span.1).await?;
        Ok(!conflicts_with_any(span, &appointments))
    }

    /// Greedy staff auto-assignment.
    ///
    /// Walks the qualified staff in directory order and returns the first
    /// member free at the requested time. No staff qualified or none free is
    /// a normal `None` outcome; only an unknown service is an error, because
    /// no occupied span can be computed without a duration.
    pub async fn find_available_staff(
        &self,
        service_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<String>, SchedulingError> {
        let Some(service) = self.catalog.service(service_id).await? else {
            return Err(SchedulingError::UnknownService(service_id.to_string()));
        };
        let plan = self.plan_for(&service);
        let span = self.occupied_span(date, time, &plan)?;

        let qualified = self.staff.staff_for_service(service_id).await?;
        if qualified.is_empty() {
            debug!("no staff qualified for service {service_id:?}");
            return Ok(None);
        }
        for member in qualified {
            if self.is_staff_free(&member.id, span).await? {
                return Ok(Some(member.id));
            }
        }
        Ok(None)
    }
}
