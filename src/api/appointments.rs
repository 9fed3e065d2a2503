//! Appointment endpoints for the three dashboards
//!
//! Lists are fetched wholesale per dashboard load and normalized at this
//! boundary. Edits round-trip through the backend; callers refetch rather
//! than patching local state.

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use super::ApiClient;
use crate::error::Error;
use crate::schedule::{normalize_all, Appointment, RawAppointment};

/// Client for the appointment endpoints
#[derive(Clone)]
pub struct AppointmentsApi {
    api: ApiClient,
}

impl AppointmentsApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The signed-in customer's appointments
    pub async fn for_customer(&self) -> Result<Vec<Appointment>, Error> {
        self.fetch("/api/customer/appointments").await
    }

    /// Every appointment of the signed-in business
    pub async fn for_business(&self) -> Result<Vec<Appointment>, Error> {
        self.fetch("/api/business/appointments").await
    }

    /// The signed-in worker's appointments
    pub async fn for_worker(&self) -> Result<Vec<Appointment>, Error> {
        self.fetch("/api/worker/appointments").await
    }

    async fn fetch(&self, path: &str) -> Result<Vec<Appointment>, Error> {
        let raw: Vec<RawAppointment> = self.api.get(path).await?;
        Ok(normalize_all(raw))
    }

    /// Move an appointment to a new date and time
    pub async fn reschedule(
        &self,
        appointment_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<(), Error> {
        let body = json!({
            "appointment_date": date.format("%Y-%m-%d").to_string(),
            "appointment_time": time.format("%H:%M").to_string(),
        });
        self.api
            .patch_empty(
                &format!("/api/appointments/{}/reschedule", appointment_id),
                &body,
            )
            .await
    }

    /// Cancel an appointment
    pub async fn cancel(&self, appointment_id: &str) -> Result<(), Error> {
        self.api
            .post_empty(&format!("/api/appointments/{}/cancel", appointment_id))
            .await
    }
}
