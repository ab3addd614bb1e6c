//! Auth Endpoints

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{AuthResponse, Credentials, ProfileUpdate, User};
use crate::session::Session;

/// Login/signup body before the presence check.
#[derive(Deserialize)]
struct RawAuth {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

impl ApiClient {
    pub async fn signup(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let raw: RawAuth = self.post("/auth/signup", credentials).await?;
        self.start_session(raw)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let raw: RawAuth = self.post("/auth/login", credentials).await?;
        self.start_session(raw)
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    /// Update the display name and refresh the cached profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let user: User = self.put("/auth/me", update).await?;
        let is_self = self.session().user().map(|u| u.id == user.id).unwrap_or(false);
        if is_self {
            if let Err(e) = self.session().update_user(user.clone()) {
                log::warn!("[AUTH] Failed to persist profile: {}", e);
            }
        }
        Ok(user)
    }

    /// Forget the session locally. The backend keeps no session state.
    pub fn logout(&self) {
        log::info!("[AUTH] Logging out");
        self.session().clear();
    }

    fn start_session(&self, raw: RawAuth) -> Result<AuthResponse, ApiError> {
        let (token, user) = match (raw.token, raw.user) {
            (Some(token), Some(user)) if !token.is_empty() => (token, user),
            _ => return Err(ApiError::InvalidResponse("Invalid response from server".to_string())),
        };
        if let Err(e) = self.session().set(Session {
            token: token.clone(),
            user: user.clone(),
        }) {
            log::warn!("[AUTH] Failed to persist session: {}", e);
        }
        log::info!("[AUTH] Signed in as {}", user.email);
        Ok(AuthResponse { token, user })
    }
}
