use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use repodeck::model::{AppConfig, Session};
use repodeck::store::{ConfigOverrides, LocalStore, apply_overrides};

use crate::Commands;

const LOG_ENV: &str = "REPODECK_LOG";

#[derive(Parser)]
#[command(name = "repodeck")]
#[command(about = "Browse, create and edit remote repositories", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding config.json and state.json
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// API base URL (overrides REPODECK_API_URL and config.json)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Identity provider base URL used by the device login flow
    #[arg(long, global = true, value_name = "URL", hide = true)]
    auth_url: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Resolved state directory and effective configuration for one invocation.
pub(crate) struct AppContext {
    pub(crate) store: LocalStore,
    pub(crate) config: AppConfig,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = LocalStore::resolve(cli.state_dir)?;
    let file_cfg = store.read_config()?;
    let overrides = ConfigOverrides {
        api_base_url: cli.api_url,
        auth_base_url: cli.auth_url,
    };
    let config = apply_overrides(file_cfg, &overrides, |k| std::env::var(k).ok());
    tracing::debug!(state_dir = %store.root().display(), api = %config.api_base_url, "resolved config");

    let ctx = AppContext { store, config };
    crate::cli_exec::handle_command(&ctx, cli.command)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!("repodeck={},{}", default_level, "warn"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(crate) fn require_session(store: &LocalStore) -> Result<Session> {
    store
        .load_session()?
        .context("not signed in (run `repodeck login`)")
}
