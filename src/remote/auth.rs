//! Sign-in: OAuth device authorization and token verification.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::model::{AppConfig, Session};

use super::http_client::ACCEPT;
use super::types::{AccessTokenResponse, DeviceCodeResponse, RemoteUser};
use super::{ApiError, AuthError, RemoteClient};

const DEVICE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SCOPES: &str = "repo read:user";
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

impl RemoteClient {
    pub fn current_user(&self) -> Result<RemoteUser> {
        tracing::debug!("GET /user");
        let resp = self
            .client
            .get(self.url("/user"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .map_err(ApiError::Transport)
            .context("fetch current user")?;
        let user: RemoteUser = self
            .ensure_ok(resp)?
            .json()
            .map_err(ApiError::Transport)
            .context("parse current user")?;
        Ok(user)
    }
}

/// Verify a bearer token against the API and build the session it belongs to.
pub fn login_with_token(cfg: &AppConfig, token: &str) -> Result<Session> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("empty token");
    }
    let user = RemoteClient::with_token(cfg, token)?.current_user()?;
    Ok(Session {
        subject_id: user.id.to_string(),
        display_name: user.name.unwrap_or_else(|| user.login.clone()),
        avatar_url: user.avatar_url,
        username: user.login,
        token: token.to_string(),
    })
}

/// A pending device authorization the user still has to approve.
#[derive(Clone, Debug)]
pub struct DeviceAuthorization {
    pub user_code: String,
    pub verification_uri: String,
    pub expires_in: Duration,
    pub interval: Duration,
    device_code: String,
}

pub struct DeviceFlow {
    auth_base_url: String,
    client_id: String,
    client: reqwest::blocking::Client,
}

impl DeviceFlow {
    pub fn new(cfg: &AppConfig) -> Result<Self> {
        let client_id = cfg.oauth_client_id.clone().context(
            "no OAuth client id configured (set REPODECK_CLIENT_ID or oauth_client_id in config.json, or pass --token)",
        )?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            auth_base_url: cfg.auth_base_url.trim_end_matches('/').to_string(),
            client_id,
            client,
        })
    }

    pub fn start(&self) -> Result<DeviceAuthorization> {
        let resp = self
            .client
            .post(format!("{}/login/device/code", self.auth_base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("client_id", self.client_id.as_str()), ("scope", SCOPES)])
            .send()
            .map_err(ApiError::Transport)
            .context("request device code")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::from_response(status, &body)).context("request device code");
        }
        let code: DeviceCodeResponse = resp
            .json()
            .map_err(ApiError::Transport)
            .context("parse device code response")?;
        Ok(DeviceAuthorization {
            user_code: code.user_code,
            verification_uri: code.verification_uri,
            expires_in: Duration::from_secs(code.expires_in),
            interval: Duration::from_secs(code.interval.unwrap_or(5)),
            device_code: code.device_code,
        })
    }

    /// Poll until the user approves or denies the request, or the code expires.
    pub fn wait_for_token(&self, auth: &DeviceAuthorization) -> Result<String> {
        let deadline = Instant::now() + auth.expires_in;
        let mut interval = auth.interval;
        loop {
            if Instant::now() >= deadline {
                return Err(AuthError::Expired.into());
            }
            std::thread::sleep(interval);

            let resp = self
                .client
                .post(format!("{}/login/oauth/access_token", self.auth_base_url))
                .header(reqwest::header::ACCEPT, "application/json")
                .form(&[
                    ("client_id", self.client_id.as_str()),
                    ("device_code", auth.device_code.as_str()),
                    ("grant_type", DEVICE_GRANT),
                ])
                .send()
                .map_err(ApiError::Transport)
                .context("poll access token")?;
            let body: AccessTokenResponse = resp
                .json()
                .map_err(ApiError::Transport)
                .context("parse access token response")?;

            if let Some(token) = body.access_token.filter(|t| !t.is_empty()) {
                return Ok(token);
            }
            match body.error.as_deref() {
                Some("authorization_pending") => {
                    tracing::debug!("authorization pending");
                }
                Some("slow_down") => {
                    interval = body
                        .interval
                        .map(Duration::from_secs)
                        .unwrap_or(interval + SLOW_DOWN_STEP);
                    tracing::debug!(interval_secs = interval.as_secs(), "provider asked to slow down");
                }
                Some("expired_token") => return Err(AuthError::Expired.into()),
                Some("access_denied") => return Err(AuthError::Denied.into()),
                Some(other) => {
                    let msg = body.error_description.unwrap_or_else(|| other.to_string());
                    return Err(AuthError::Provider(msg).into());
                }
                None => {
                    return Err(AuthError::Provider("no access token in response".to_string()).into());
                }
            }
        }
    }
}
