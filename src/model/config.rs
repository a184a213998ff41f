use serde::{Deserialize, Serialize};

use super::Session;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://github.com";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("repodeck/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,

    /// OAuth app used for the device authorization flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_client_id: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            oauth_client_id: None,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    pub version: u32,

    #[serde(default)]
    pub session: Option<StoredSession>,
}

/// Persisted form of a [`Session`].
///
/// The token is optional on disk: an identity that outlived its token is kept for display but
/// does not count as signed in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub subject_id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    pub signed_in_at: String,
}

impl StoredSession {
    pub fn from_session(session: &Session, signed_in_at: String) -> Self {
        Self {
            subject_id: session.subject_id.clone(),
            display_name: session.display_name.clone(),
            avatar_url: session.avatar_url.clone(),
            username: session.username.clone(),
            token: Some(session.token.clone()),
            signed_in_at,
        }
    }

    pub fn to_session(&self) -> Option<Session> {
        let token = self.token.clone().filter(|t| !t.is_empty())?;
        Some(Session {
            subject_id: self.subject_id.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            username: self.username.clone(),
            token,
        })
    }
}
