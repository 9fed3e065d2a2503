//! Bookline Rust Client Library
//!
//! A Rust client for the Bookline appointment booking platform, covering
//! authentication for customers, businesses and workers, the browse and
//! booking endpoints, the weekly schedule view-model and payment
//! tokenization.

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod fetch;
pub mod i18n;
pub mod payments;
pub mod places;
pub mod schedule;

use reqwest::Client;
use std::sync::Arc;

use crate::api::{ApiClient, AppointmentsApi, BookingsApi, CatalogApi};
use crate::auth::{Auth, SessionStore, StorageBackend};
use crate::booking::BookingFlow;
use crate::config::ClientOptions;
use crate::payments::PaymentsApi;
use crate::places::PlacesApi;
use crate::schedule::{Appointment, WeekView};

/// The main entry point for the Bookline client
pub struct Bookline {
    /// Resolved backend base URL
    pub base_url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    /// Session store shared by every sub-client
    store: Arc<SessionStore>,
    /// Auth client for sign-in and account management
    auth: Auth,
}

impl Bookline {
    /// Create a new Bookline client
    ///
    /// # Example
    ///
    /// ```
    /// use bookline::Bookline;
    ///
    /// let bookline = Bookline::new("https://api.bookline.app");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a client resolving the base URL from the environment.
    ///
    /// Falls back to the production endpoint when `BOOKLINE_API_URL` is
    /// unset.
    pub fn from_env() -> Self {
        Self::new(&config::resolve_base_url(None))
    }

    /// Create a new Bookline client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use bookline::{config::ClientOptions, Bookline};
    ///
    /// let options = ClientOptions::default().with_persist_session(false);
    /// let bookline = Bookline::new_with_options("https://api.bookline.app", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let store = Arc::new(SessionStore::in_memory());
        Self::assemble(base_url, options, store)
    }

    /// Create a client persisting sessions through a custom storage backend
    pub fn new_with_storage(
        base_url: &str,
        options: ClientOptions,
        backend: Box<dyn StorageBackend>,
    ) -> Self {
        let persist = options.persist_session;
        let store = Arc::new(SessionStore::new(backend, persist));
        Self::assemble(base_url, options, store)
    }

    fn assemble(base_url: &str, options: ClientOptions, store: Arc<SessionStore>) -> Self {
        let base_url = config::resolve_base_url(Some(base_url));
        let http_client = Client::new();
        let api = ApiClient::new(&base_url, http_client.clone(), store.clone());
        let auth = Auth::new(api);

        Self {
            base_url,
            http_client,
            options,
            store,
            auth,
        }
    }

    fn api(&self) -> ApiClient {
        ApiClient::new(&self.base_url, self.http_client.clone(), self.store.clone())
    }

    /// Get a reference to the auth client for sign-in and account management
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The shared session store
    pub fn session_store(&self) -> Arc<SessionStore> {
        self.store.clone()
    }

    /// Create an appointments client for the dashboard views
    pub fn appointments(&self) -> AppointmentsApi {
        AppointmentsApi::new(self.api())
    }

    /// Create a catalog client for the browse endpoints
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.api())
    }

    /// Create a bookings client
    pub fn bookings(&self) -> BookingsApi {
        BookingsApi::new(self.api())
    }

    /// Create a places client for address autocomplete
    pub fn places(&self) -> PlacesApi {
        PlacesApi::new(self.api())
    }

    /// Create a payments client
    pub fn payments(&self) -> PaymentsApi {
        PaymentsApi::new(self.api())
    }

    /// Start a fresh multi-step booking flow
    ///
    /// # Example
    ///
    /// ```
    /// use bookline::Bookline;
    ///
    /// let bookline = Bookline::new("https://api.bookline.app");
    /// let flow = bookline.booking_flow();
    /// assert!(!flow.selector().can_submit());
    /// ```
    pub fn booking_flow(&self) -> BookingFlow {
        BookingFlow::new(self.catalog(), self.bookings())
    }

    /// Create a weekly schedule view over fetched appointments, rendered in
    /// the client's default locale
    pub fn week_view(&self, appointments: Vec<Appointment>) -> WeekView {
        WeekView::new(appointments, self.options.default_locale)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::Actor;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::i18n::Locale;
    pub use crate::schedule::WeekView;
    pub use crate::Bookline;
}
