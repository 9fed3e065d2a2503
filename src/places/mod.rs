//! Address autocomplete, proxied through the backend
//!
//! The mapping provider is never called directly from the client; the
//! backend holds the API key and relays the lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::ApiClient;
use crate::error::Error;

/// Trailing debounce window applied to autocomplete lookups
pub const AUTOCOMPLETE_DEBOUNCE: Duration = Duration::from_millis(500);

/// One address suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    /// Provider-side place identifier
    pub id: String,

    /// Human-readable address line
    pub label: String,
}

/// Client for the address autocomplete proxy
#[derive(Clone)]
pub struct PlacesApi {
    api: ApiClient,
}

impl PlacesApi {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Look up address suggestions for a partial query
    pub async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        self.api
            .get_with_query("/api/places/autocomplete", params)
            .await
    }
}

/// Trailing debouncer: only the most recent call survives the window.
///
/// Each call bumps a shared generation counter, sleeps out the window and
/// then runs its closure only if no newer call arrived meanwhile; superseded
/// calls resolve to `None` without running their closure.
#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<Mutex<u64>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// A debouncer preconfigured with the autocomplete window
    pub fn for_autocomplete() -> Self {
        Self::new(AUTOCOMPLETE_DEBOUNCE)
    }

    /// Run `operation` unless a newer call supersedes this one
    pub async fn debounce<F, Fut, T>(&self, operation: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = {
            let mut generation = self.generation.lock().unwrap();
            *generation += 1;
            *generation
        };

        tokio::time::sleep(self.window).await;

        if *self.generation.lock().unwrap() != ticket {
            return None;
        }
        Some(operation().await)
    }
}
