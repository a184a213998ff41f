use crate::model::AppConfig;

pub const API_URL_ENV: &str = "REPODECK_API_URL";
pub const CLIENT_ID_ENV: &str = "REPODECK_CLIENT_ID";

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub auth_base_url: Option<String>,
}

/// Layer command-line flags and environment variables over the file config.
///
/// Flags win over the environment, which wins over `config.json`.
pub fn apply_overrides(
    mut cfg: AppConfig,
    flags: &ConfigOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    if let Some(url) = non_empty(flags.api_base_url.clone()).or_else(|| non_empty(env(API_URL_ENV)))
    {
        cfg.api_base_url = url;
    }
    if let Some(url) = non_empty(flags.auth_base_url.clone()) {
        cfg.auth_base_url = url;
    }
    if let Some(id) = non_empty(env(CLIENT_ID_ENV)) {
        cfg.oauth_client_id = Some(id);
    }
    cfg.api_base_url = cfg.api_base_url.trim_end_matches('/').to_string();
    cfg.auth_base_url = cfg.auth_base_url.trim_end_matches('/').to_string();
    cfg
}
