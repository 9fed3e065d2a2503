//! Shared request plumbing for the backend REST API

mod appointments;
mod bookings;
mod catalog;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

pub use appointments::*;
pub use bookings::*;
pub use catalog::*;

pub(crate) const CLIENT_INFO: &str = "bookline-rust/0.2.0";

/// Request plumbing shared by every endpoint client.
///
/// Attaches the bearer token of whichever session is current, stamps the
/// anonymous visitor id, and maps a 401 response to a cleared session so
/// the host application can redirect to sign-in.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    store: Arc<SessionStore>,
}

impl ApiClient {
    pub(crate) fn new(base_url: &str, client: Client, store: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            store,
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn session_store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    fn decorate<'a>(&self, builder: FetchBuilder<'a>, authed: bool) -> FetchBuilder<'a> {
        let mut builder = builder
            .header("X-Client-Info", CLIENT_INFO)
            .header("X-Visitor-Id", &self.store.visitor_id());

        if authed {
            if let Some(token) = self.store.access_token() {
                builder = builder.bearer_auth(&token);
            }
        }
        builder
    }

    /// Map a 401 into a cleared session and an auth error
    fn intercept(&self, error: Error) -> Error {
        if error.is_unauthorized() {
            log::warn!("backend returned 401, clearing stored session");
            self.store.clear_current();
            return Error::auth("session expired");
        }
        error
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::get(&self.client, &url), true)
            .execute::<T>()
            .await
            .map_err(|e| self.intercept(e))
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: HashMap<String, String>,
    ) -> Result<T, Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::get(&self.client, &url).query(params), true)
            .execute::<T>()
            .await
            .map_err(|e| self.intercept(e))
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::post(&self.client, &url), true)
            .json(body)?
            .execute::<T>()
            .await
            .map_err(|e| self.intercept(e))
    }

    /// POST without a body, discarding the response
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::post(&self.client, &url), true)
            .execute_empty()
            .await
            .map_err(|e| self.intercept(e))
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::put(&self.client, &url), true)
            .json(body)?
            .execute::<T>()
            .await
            .map_err(|e| self.intercept(e))
    }

    pub(crate) async fn patch_empty<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::patch(&self.client, &url), true)
            .json(body)?
            .execute_empty()
            .await
            .map_err(|e| self.intercept(e))
    }

    /// POST without attaching a session token (sign-in, sign-up)
    pub(crate) async fn post_anon<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.endpoint(path);
        self.decorate(Fetch::post(&self.client, &url), false)
            .json(body)?
            .execute::<T>()
            .await
    }
}
