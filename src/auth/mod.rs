//! Authentication and session management for Bookline

mod session;
mod types;

use crate::api::ApiClient;
use crate::error::Error;
use serde_json::json;

pub use session::*;
pub use types::*;

/// Routes on which a 401 must not trigger a redirect, to avoid loops
const AUTH_ROUTES: &[&str] = &[
    "/login",
    "/signup",
    "/forgot-password",
    "/appoint/login",
    "/appoint/signup",
];

/// Where the UI should navigate after a request came back 401.
///
/// Returns `None` when the user is already on an auth-related route.
pub fn redirect_after_401(actor: Actor, current_route: &str) -> Option<&'static str> {
    if AUTH_ROUTES
        .iter()
        .any(|route| current_route.starts_with(route))
    {
        return None;
    }
    Some(actor.sign_in_route())
}

/// Client for authentication and account management
pub struct Auth {
    api: ApiClient,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new account.
    ///
    /// Required fields and the password confirmation are checked client-side;
    /// a [`Error::Validation`] means no request was issued.
    pub async fn sign_up(&self, actor: Actor, request: SignUpRequest) -> Result<Session, Error> {
        validate_sign_up(&request)?;

        let path = format!("{}/register", actor.auth_prefix());
        let response: AuthResponse = self.api.post_anon(&path, &request).await?;
        self.store_session(actor, response)
    }

    /// Sign in with email and password against the actor's endpoint
    pub async fn sign_in(
        &self,
        actor: Actor,
        email: &str,
        password: &str,
    ) -> Result<Session, Error> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("email and password are required"));
        }

        let path = format!("{}/login", actor.auth_prefix());
        let body = json!({ "email": email, "password": password });
        let response: AuthResponse = self.api.post_anon(&path, &body).await?;
        self.store_session(actor, response)
    }

    /// Sign out the current session
    pub async fn sign_out(&self) -> Result<(), Error> {
        let actor = self
            .api
            .session_store()
            .current_actor()
            .ok_or_else(|| Error::auth("not signed in"))?;

        let path = format!("{}/logout", actor.auth_prefix());
        self.api.post_empty(&path).await?;

        self.api.session_store().clear(actor);
        Ok(())
    }

    /// Fetch the signed-in account's profile and cache it
    pub async fn profile(&self) -> Result<Profile, Error> {
        let actor = self
            .api
            .session_store()
            .current_actor()
            .ok_or_else(|| Error::auth("not signed in"))?;

        let path = format!("{}/me", actor.auth_prefix());
        let profile: Profile = self.api.get(&path).await?;

        if let Ok(blob) = serde_json::to_string(&profile) {
            self.api.session_store().cache_profile(actor, &blob);
        }
        Ok(profile)
    }

    /// Update the signed-in account's profile
    pub async fn update_profile(&self, attributes: ProfileUpdate) -> Result<Profile, Error> {
        let actor = self
            .api
            .session_store()
            .current_actor()
            .ok_or_else(|| Error::auth("not signed in"))?;

        let path = format!("{}/me", actor.auth_prefix());
        let profile: Profile = self.api.put(&path, &attributes).await?;

        if let Ok(blob) = serde_json::to_string(&profile) {
            self.api.session_store().cache_profile(actor, &blob);
        }
        Ok(profile)
    }

    /// Make a previously persisted session for `actor` current
    pub fn restore_session(&self, actor: Actor) -> Option<Session> {
        self.api.session_store().restore(actor)
    }

    /// The current session
    pub fn session(&self) -> Option<Session> {
        self.api.session_store().current()
    }

    fn store_session(&self, actor: Actor, response: AuthResponse) -> Result<Session, Error> {
        if let Some(error) = response.error {
            return Err(Error::auth(error));
        }
        let token = response
            .access_token
            .ok_or_else(|| Error::auth("no access token in response"))?;

        let session = Session::new(token, actor, response.expires_in.unwrap_or(3600));
        self.api.session_store().save(session.clone());

        if let Some(user) = response.user {
            if let Ok(blob) = serde_json::to_string(&user) {
                self.api.session_store().cache_profile(actor, &blob);
            }
        }
        Ok(session)
    }
}

fn validate_sign_up(request: &SignUpRequest) -> Result<(), Error> {
    if request.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if request.email.trim().is_empty() {
        return Err(Error::validation("email is required"));
    }
    if request.password.is_empty() {
        return Err(Error::validation("password is required"));
    }
    if request.password != request.password_confirmation {
        return Err(Error::validation("passwords do not match"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignUpRequest {
        SignUpRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: None,
            password: "hunter22".into(),
            password_confirmation: "hunter22".into(),
        }
    }

    #[test]
    fn sign_up_validation() {
        assert!(validate_sign_up(&request()).is_ok());

        let mut missing_name = request();
        missing_name.name = "  ".into();
        assert!(matches!(
            validate_sign_up(&missing_name),
            Err(Error::Validation(_))
        ));

        let mut mismatch = request();
        mismatch.password_confirmation = "hunter23".into();
        assert!(matches!(
            validate_sign_up(&mismatch),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn redirect_skips_auth_routes() {
        assert_eq!(
            redirect_after_401(Actor::Customer, "/dashboard"),
            Some("/signup")
        );
        assert_eq!(
            redirect_after_401(Actor::Worker, "/appoint/schedule"),
            Some("/appoint/login")
        );
        assert_eq!(redirect_after_401(Actor::Customer, "/signup"), None);
        assert_eq!(redirect_after_401(Actor::Business, "/appoint/login"), None);
        assert_eq!(redirect_after_401(Actor::Customer, "/forgot-password"), None);
    }

    #[test]
    fn password_confirmation_never_serializes() {
        let body = serde_json::to_value(request()).unwrap();
        assert!(body.get("password_confirmation").is_none());
        assert_eq!(body["email"], "ada@example.com");
    }
}
