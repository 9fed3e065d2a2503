//! Card tokenization and payment completion
//!
//! Card details are exchanged for an opaque token before anything reaches a
//! booking endpoint. Tokenization goes through the backend's processor
//! proxy, so no processor key ships with the client; tests and alternative
//! processors plug in through [`CardTokenizer`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ApiClient;
use crate::error::Error;

/// Raw card details, never persisted and never sent to booking endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
    pub holder_name: String,
}

/// Opaque processor token standing in for the card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardToken {
    pub token: String,
}

/// Confirmation of a completed payment
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfirmation {
    /// Backend payment identifier
    pub id: String,

    /// Final payment status
    pub status: Option<String>,
}

/// Exchanges card details for a processor token
#[async_trait]
pub trait CardTokenizer: Send + Sync {
    async fn tokenize(&self, card: &CardDetails) -> Result<CardToken, Error>;
}

/// Default tokenizer, posting to the backend's processor proxy
#[derive(Clone)]
pub struct ProxyTokenizer {
    api: ApiClient,
}

impl ProxyTokenizer {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CardTokenizer for ProxyTokenizer {
    async fn tokenize(&self, card: &CardDetails) -> Result<CardToken, Error> {
        validate_card(card)?;
        self.api.post("/api/payments/tokenize", card).await
    }
}

/// Client for payment completion
#[derive(Clone)]
pub struct PaymentsApi {
    api: ApiClient,
}

impl PaymentsApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The default backend-proxied tokenizer
    pub fn tokenizer(&self) -> ProxyTokenizer {
        ProxyTokenizer::new(self.api.clone())
    }

    /// Complete payment for a booking with a previously obtained token
    pub async fn complete(
        &self,
        booking_id: &str,
        token: &CardToken,
    ) -> Result<PaymentConfirmation, Error> {
        let body = json!({
            "booking_id": booking_id,
            "token": token.token,
        });
        self.api.post("/api/payments/complete", &body).await
    }
}

fn validate_card(card: &CardDetails) -> Result<(), Error> {
    if card.number.trim().is_empty() || card.cvc.trim().is_empty() {
        return Err(Error::validation("card number and cvc are required"));
    }
    if card.exp_month == 0 || card.exp_month > 12 {
        return Err(Error::validation("invalid expiry month"));
    }
    Ok(())
}
