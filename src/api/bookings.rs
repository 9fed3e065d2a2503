//! Booking creation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::Error;

/// A booking creation request, assembled by the booking selector
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingRequest {
    pub business_id: String,
    pub worker_id: String,
    pub service_id: String,

    /// Requested day
    pub date: NaiveDate,

    /// Requested slot, `HH:MM`
    pub time: String,

    /// Free-form note from the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Confirmation returned when a booking was accepted
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfirmation {
    /// Identifier of the created appointment
    pub id: String,

    /// Initial status assigned by the backend
    pub status: Option<String>,

    /// Human-readable confirmation message
    pub message: Option<String>,
}

/// Client for booking creation
#[derive(Clone)]
pub struct BookingsApi {
    api: ApiClient,
}

impl BookingsApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit a booking request
    pub async fn create(&self, request: &BookingRequest) -> Result<BookingConfirmation, Error> {
        self.api.post("/api/bookings", request).await
    }
}
