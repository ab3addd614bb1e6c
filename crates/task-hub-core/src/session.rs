//! Session Context
//!
//! The signed-in user's token and cached profile. Injected into the HTTP
//! client and the views at startup instead of being read from ambient
//! globals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::StorageError;
use crate::models::{EntityId, User};

/// Storage key of the raw bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Storage key of the JSON-encoded user
pub const USER_KEY: &str = "user";

/// Minimal string key-value persistence (localStorage in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, used by tests and as a fallback when the browser denies storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Claims the backend signs into the token. Display only, never trusted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    pub user_id: EntityId,
    pub email: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Shared handle over the persisted session. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    store: Rc<dyn KeyValueStore>,
    cached: Rc<RefCell<Option<Session>>>,
}

impl SessionContext {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cached: Rc::new(RefCell::new(None)),
        }
    }

    /// Read the persisted session. Corrupt user data clears both keys.
    pub fn load(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY);
        let raw_user = self.store.get(USER_KEY);

        let user = match raw_user.as_deref() {
            Some(raw) if !raw.is_empty() && raw != "undefined" && raw != "null" => {
                match serde_json::from_str::<User>(raw) {
                    Ok(user) => Some(user),
                    Err(e) => {
                        log::warn!("[SESSION] Discarding unreadable stored user: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let session = match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => Some(Session { token, user }),
            _ => {
                self.clear();
                None
            }
        };
        *self.cached.borrow_mut() = session.clone();
        session
    }

    /// Persist a freshly issued session.
    pub fn set(&self, session: Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user).map_err(|e| StorageError::Encode(e.to_string()))?;
        *self.cached.borrow_mut() = Some(session.clone());
        self.store.set(TOKEN_KEY, &session.token)?;
        self.store.set(USER_KEY, &user_json)?;
        Ok(())
    }

    /// Replace the cached profile, keeping the token.
    pub fn update_user(&self, user: User) -> Result<(), StorageError> {
        let token = match self.token() {
            Some(token) => token,
            None => return Ok(()),
        };
        self.set(Session { token, user })
    }

    /// Drop both keys. Storage failures are logged, never raised.
    pub fn clear(&self) {
        *self.cached.borrow_mut() = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("[SESSION] Failed to remove {}: {}", key, e);
            }
        }
    }

    /// Token as currently persisted; read on every request.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<User> {
        self.cached.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn current_claims(&self) -> Option<TokenClaims> {
        self.token().as_deref().and_then(decode_claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({"id": 1, "email": "user@example.com"})).unwrap()
    }

    fn context() -> (Rc<MemoryStore>, SessionContext) {
        let store = Rc::new(MemoryStore::new());
        let ctx = SessionContext::new(store.clone());
        (store, ctx)
    }

    fn fake_token(claims: serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", payload)
    }

    #[test]
    fn test_set_then_load() {
        let (store, ctx) = context();
        ctx.set(Session { token: "t1".into(), user: user() }).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t1"));

        let fresh = SessionContext::new(store);
        let loaded = fresh.load().unwrap();
        assert_eq!(loaded.token, "t1");
        assert_eq!(loaded.user.email, "user@example.com");
        assert_eq!(fresh.user().unwrap().id, EntityId::Int(1));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let (store, ctx) = context();
        ctx.set(Session { token: "t1".into(), user: user() }).unwrap();
        ctx.clear();
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
        assert!(!ctx.is_authenticated());
        assert!(ctx.user().is_none());
    }

    #[test]
    fn test_corrupt_user_clears_session() {
        let (store, ctx) = context();
        store.set(TOKEN_KEY, "t1").unwrap();
        store.set(USER_KEY, "undefined").unwrap();
        assert!(ctx.load().is_none());
        assert!(store.get(TOKEN_KEY).is_none());

        store.set(TOKEN_KEY, "t1").unwrap();
        store.set(USER_KEY, "{not json").unwrap();
        assert!(ctx.load().is_none());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_decode_claims() {
        let token = fake_token(json!({"user_id": 7, "email": "a@b.c", "exp": 1700000000}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, EntityId::Int(7));
        assert_eq!(claims.email, "a@b.c");
        assert_eq!(claims.exp, Some(1700000000));

        assert!(decode_claims("not-a-jwt").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
    }

    #[test]
    fn test_update_user_keeps_token() {
        let (_store, ctx) = context();
        ctx.set(Session { token: "t1".into(), user: user() }).unwrap();
        let mut renamed = user();
        renamed.name = Some("Jane".into());
        ctx.update_user(renamed).unwrap();
        assert_eq!(ctx.token().as_deref(), Some("t1"));
        assert_eq!(ctx.user().unwrap().name.as_deref(), Some("Jane"));
    }
}
