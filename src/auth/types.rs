//! Types for authentication and account management

use serde::{Deserialize, Serialize};

/// The kind of signed-in party.
///
/// Business and worker accounts live on the `/appoint` side of the platform
/// and keep their sessions in a separate storage namespace so a customer
/// session in the same browser profile never collides with a staff one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Customer,
    Business,
    Worker,
}

impl Actor {
    /// Storage namespace for this actor's session data
    pub fn namespace(&self) -> &'static str {
        match self {
            Actor::Customer => "customer",
            Actor::Business | Actor::Worker => "appoint",
        }
    }

    /// Path prefix of this actor's authentication endpoints
    pub(crate) fn auth_prefix(&self) -> &'static str {
        match self {
            Actor::Customer => "/api/auth",
            Actor::Business | Actor::Worker => "/api/appoint/auth",
        }
    }

    /// Route the UI should land on after a forced sign-out
    pub fn sign_in_route(&self) -> &'static str {
        match self {
            Actor::Customer => "/signup",
            Actor::Business | Actor::Worker => "/appoint/login",
        }
    }
}

/// Authentication response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The bearer token for subsequent requests
    #[serde(alias = "token")]
    pub access_token: Option<String>,

    /// Token lifetime in seconds
    pub expires_in: Option<i64>,

    /// The signed-in account, when the backend returns it inline
    pub user: Option<Profile>,

    /// Any error that occurred
    pub error: Option<String>,
}

/// Account profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// The account ID
    pub id: String,

    /// Display name
    pub name: Option<String>,

    /// The account's email address
    pub email: Option<String>,

    /// The account's phone number
    pub phone: Option<String>,

    /// Role string reported by the backend
    pub role: Option<String>,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    /// Display name
    pub name: String,

    /// Email address, used as the sign-in identifier
    pub email: String,

    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Password
    pub password: String,

    /// Password confirmation, checked client-side and not sent
    #[serde(skip_serializing)]
    pub password_confirmation: String,
}

/// Profile attributes that can be updated
#[derive(Debug, Clone, Serialize, Default)]
pub struct ProfileUpdate {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
