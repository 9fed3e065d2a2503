//! Session state and its persistence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::types::Actor;

/// Session data for a signed-in actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// Who this session belongs to
    pub actor: Actor,

    /// The token lifetime in seconds
    pub expires_in: i64,

    /// The expiry timestamp
    pub expires_at: Option<i64>,
}

impl Session {
    /// Create a new session expiring `expires_in` seconds from now
    pub fn new(access_token: String, actor: Actor, expires_in: i64) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs() as i64;

        Self {
            access_token,
            actor,
            expires_in,
            expires_at: Some(now + expires_in),
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;

            now >= expires_at
        } else {
            false
        }
    }
}

/// Key-value persistence for session data.
///
/// Models the browser's persistent storage; hosts embed their own backend
/// (a file, a keychain, a test double) by implementing these three methods.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage backend, the default
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

const SESSION_ITEM: &str = "session";
const PROFILE_ITEM: &str = "profile";
const VISITOR_KEY: &str = "bookline.visitor_id";

/// Single source of truth for the current session.
///
/// Customer sessions and business/worker ("appoint") sessions are persisted
/// under separate key namespaces derived from [`Actor::namespace`], never
/// from call sites. The in-memory `current` cell tracks which actor is
/// active right now.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
    persist: bool,
    current: Mutex<Option<Session>>,
}

impl SessionStore {
    /// Create a store over the given backend
    pub fn new(backend: Box<dyn StorageBackend>, persist: bool) -> Self {
        Self {
            backend,
            persist,
            current: Mutex::new(None),
        }
    }

    /// Create a store over in-memory storage
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()), true)
    }

    fn key(actor: Actor, item: &str) -> String {
        format!("bookline.{}.{}", actor.namespace(), item)
    }

    /// Make `session` current and persist it under its actor's namespace
    pub fn save(&self, session: Session) {
        if self.persist {
            if let Ok(json) = serde_json::to_string(&session) {
                self.backend.set(&Self::key(session.actor, SESSION_ITEM), &json);
            }
        }
        *self.current.lock().unwrap() = Some(session);
    }

    /// Read a persisted session for `actor` without making it current
    pub fn load(&self, actor: Actor) -> Option<Session> {
        let json = self.backend.get(&Self::key(actor, SESSION_ITEM))?;
        serde_json::from_str(&json).ok()
    }

    /// Make the persisted session for `actor` current, if there is one
    pub fn restore(&self, actor: Actor) -> Option<Session> {
        let session = self.load(actor)?;
        *self.current.lock().unwrap() = Some(session.clone());
        Some(session)
    }

    /// The current session
    pub fn current(&self) -> Option<Session> {
        self.current.lock().unwrap().clone()
    }

    /// The current actor
    pub fn current_actor(&self) -> Option<Actor> {
        self.current.lock().unwrap().as_ref().map(|s| s.actor)
    }

    /// The current bearer token
    pub fn access_token(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Drop the session and cached profile for `actor`
    pub fn clear(&self, actor: Actor) {
        self.backend.remove(&Self::key(actor, SESSION_ITEM));
        self.backend.remove(&Self::key(actor, PROFILE_ITEM));

        let mut current = self.current.lock().unwrap();
        if current.as_ref().map(|s| s.actor.namespace()) == Some(actor.namespace()) {
            *current = None;
        }
    }

    /// Drop whichever session is current
    pub fn clear_current(&self) {
        let actor = self.current_actor();
        if let Some(actor) = actor {
            self.clear(actor);
        }
    }

    /// Cache the serialized profile blob for `actor`
    pub fn cache_profile(&self, actor: Actor, profile_json: &str) {
        if self.persist {
            self.backend.set(&Self::key(actor, PROFILE_ITEM), profile_json);
        }
    }

    /// The cached profile blob for `actor`, if any
    pub fn cached_profile(&self, actor: Actor) -> Option<String> {
        self.backend.get(&Self::key(actor, PROFILE_ITEM))
    }

    /// Stable anonymous visitor identifier, generated on first use
    pub fn visitor_id(&self) -> String {
        if let Some(id) = self.backend.get(VISITOR_KEY) {
            return id;
        }
        let id = Uuid::new_v4().to_string();
        self.backend.set(VISITOR_KEY, &id);
        id
    }
}
