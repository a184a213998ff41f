use anyhow::{Context, Result};

use repodeck::remote::RemoteClient;

use crate::{AppContext, Commands, ReposCommands, require_session};

mod content;
mod dispatch;
mod identity;
mod repos;
mod time_utils;

pub(super) fn handle_command(ctx: &AppContext, command: Commands) -> Result<()> {
    dispatch::handle_command(ctx, command)
}

/// Client for the stored session; fails when nobody is signed in.
fn session_client(ctx: &AppContext) -> Result<RemoteClient> {
    let session = require_session(&ctx.store)?;
    RemoteClient::new(&ctx.config, &session).context("build API client")
}
