use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{AppConfig, AppState};

mod config_overrides;
mod session;

pub use self::config_overrides::{ConfigOverrides, apply_overrides};

const HOME_ENV: &str = "REPODECK_HOME";

/// On-disk home for `config.json` and `state.json`.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Resolve the state directory: explicit path, then `REPODECK_HOME`, then the platform
    /// config directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return Self::open(&root);
        }
        if let Ok(home) = std::env::var(HOME_ENV)
            && !home.is_empty()
        {
            return Self::open(Path::new(&home));
        }
        let dirs = directories::ProjectDirs::from("", "", "repodeck")
            .ok_or_else(|| anyhow!("could not determine a config directory (set {})", HOME_ENV))?;
        Self::open(dirs.config_dir())
    }

    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create state dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<AppConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: AppConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &AppConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<AppState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(AppState {
                version: 1,
                session: None,
            });
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: AppState = serde_json::from_slice(&bytes).context("parse state.json")?;
        Ok(st)
    }

    pub fn write_state(&self, st: &AppState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    // state.json carries the bearer token; keep both files owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("restrict permissions of {}", tmp.display()))?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store/store_tests.rs"]
mod tests;
