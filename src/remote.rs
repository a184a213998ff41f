use anyhow::{Context, Result};

use crate::model::{AppConfig, Session};

mod auth;
mod contents;
mod error;
mod http_client;
mod repos;
mod types;

pub use self::auth::{DeviceAuthorization, DeviceFlow, login_with_token};
pub use self::contents::RepoContents;
pub use self::error::{ApiError, AuthError};
pub use self::types::RemoteUser;

/// Blocking client for the source-control REST API.
///
/// Every request carries the bearer token of the session the client was built from.
pub struct RemoteClient {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(cfg: &AppConfig, session: &Session) -> Result<Self> {
        Self::with_token(cfg, &session.token)
    }

    /// Client for a token that has not been turned into a [`Session`] yet.
    pub fn with_token(cfg: &AppConfig, token: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
