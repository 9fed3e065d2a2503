//! Appointment wire shapes and the normalization boundary
//!
//! The backend has shipped three generations of appointment payloads: a
//! combined `start_time` string, split `appointment_date`/`appointment_time`
//! fields, and the legacy `date`/`time` pair. Everything is normalized into
//! one canonical [`Appointment`] immediately after fetch; view code never
//! sees a raw record.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown when the backend omitted the customer name
pub const PLACEHOLDER_CUSTOMER: &str = "Guest";

/// Placeholder shown when the backend omitted the phone number
pub const PLACEHOLDER_PHONE: &str = "-";

/// Placeholder shown when no service name could be resolved
pub const PLACEHOLDER_SERVICE: &str = "Service";

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    /// Parse a wire status string, defaulting to `Confirmed`
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("pending") => AppointmentStatus::Pending,
            Some("cancelled") => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Confirmed,
        }
    }

    /// Hex color used by the schedule grid and legend for this status
    pub fn color(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "#4caf50",
            AppointmentStatus::Pending => "#ff9800",
            AppointmentStatus::Cancelled => "#f44336",
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Confirmed
    }
}

/// Nested service object on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawService {
    pub name: Option<String>,
}

/// An appointment as the backend sends it, all layouts tolerated
#[derive(Debug, Clone, Deserialize)]
pub struct RawAppointment {
    #[serde(default)]
    pub id: Option<Value>,

    /// Combined date-time, ISO or space-separated
    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,

    /// Legacy split fields
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,

    /// Nested service object
    #[serde(default)]
    pub service: Option<RawService>,
    /// Flat service name, either casing
    #[serde(default, alias = "serviceName")]
    pub service_name: Option<String>,

    #[serde(default, alias = "workerName")]
    pub worker_name: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// The canonical appointment record all view code consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    /// Opaque backend identifier
    pub id: String,

    /// Calendar day of the appointment
    pub date: NaiveDate,

    /// Start time, truncated to the minute
    pub time: NaiveTime,

    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub worker_name: Option<String>,
    pub status: AppointmentStatus,
}

impl RawAppointment {
    /// Normalize into the canonical record.
    ///
    /// Returns `None` when no date-time layout resolves; the record is then
    /// excluded from every slot rather than treated as an error.
    pub fn normalize(self) -> Option<Appointment> {
        let (date, time) = match self.resolve_start() {
            Some(parts) => parts,
            None => {
                log::debug!(
                    "dropping appointment with unresolvable date-time: {:?}",
                    self.id
                );
                return None;
            }
        };

        let service_name = self
            .service
            .and_then(|s| s.name)
            .or(self.service_name)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_SERVICE.to_string());

        Some(Appointment {
            id: self.id.map(id_to_string).unwrap_or_default(),
            date,
            time,
            customer_name: self
                .customer_name
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_CUSTOMER.to_string()),
            customer_phone: self
                .customer_phone
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_PHONE.to_string()),
            service_name,
            worker_name: self.worker_name.filter(|s| !s.trim().is_empty()),
            status: AppointmentStatus::parse(self.status.as_deref()),
        })
    }

    fn resolve_start(&self) -> Option<(NaiveDate, NaiveTime)> {
        if let Some(combined) = &self.start_time {
            return parse_combined(combined);
        }
        if let (Some(date), Some(time)) = (&self.appointment_date, &self.appointment_time) {
            return parse_split(date, time);
        }
        if let (Some(date), Some(time)) = (&self.date, &self.time) {
            return parse_split(date, time);
        }
        None
    }
}

/// Normalize a freshly fetched list, dropping unresolvable records
pub fn normalize_all(raw: Vec<RawAppointment>) -> Vec<Appointment> {
    raw.into_iter()
        .filter_map(RawAppointment::normalize)
        .collect()
}

fn parse_combined(value: &str) -> Option<(NaiveDate, NaiveTime)> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value.trim(), format) {
            return Some((dt.date(), truncate_to_minute(dt.time())));
        }
    }
    None
}

fn parse_split(date: &str, time: &str) -> Option<(NaiveDate, NaiveTime)> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .ok()?;
    Some((date, truncate_to_minute(time)))
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn id_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
