use std::io::Write;

use repodeck::remote::{DeviceFlow, login_with_token};

use super::time_utils::now_ts;
use super::*;

pub(super) fn handle_login_command(ctx: &AppContext, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            let flow = DeviceFlow::new(&ctx.config)?;
            let pending = flow.start()?;
            println!("Open {} and enter code {}", pending.verification_uri, pending.user_code);
            std::io::stdout().flush().context("flush stdout")?;
            flow.wait_for_token(&pending)?
        }
    };

    // The stored session is only replaced once the new token has been verified.
    let session = login_with_token(&ctx.config, &token).context("verify token")?;
    ctx.store
        .save_session(&session, now_ts())
        .context("store session in state.json")?;
    tracing::info!(user = %session.username, "signed in");
    println!("Signed in as {} ({})", session.username, session.display_name);
    Ok(())
}

pub(super) fn handle_logout_command(ctx: &AppContext) -> Result<()> {
    if ctx.store.clear_session().context("clear session")? {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

pub(super) fn handle_whoami_command(ctx: &AppContext, json: bool) -> Result<()> {
    let stored = ctx
        .store
        .stored_session()?
        .context("not signed in (run `repodeck login`)")?;
    let signed_in = stored.token.is_some();
    if json {
        let mut view = stored.clone();
        view.token = None;
        let mut value = serde_json::to_value(&view).context("serialize whoami json")?;
        value["signed_in"] = serde_json::Value::Bool(signed_in);
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("serialize whoami json")?
        );
    } else {
        println!("user: {}", stored.username);
        println!("name: {}", stored.display_name);
        println!("id: {}", stored.subject_id);
        if let Some(avatar) = &stored.avatar_url {
            println!("avatar: {}", avatar);
        }
        println!("signed_in_at: {}", stored.signed_in_at);
        if !signed_in {
            println!("token: missing (run `repodeck login`)");
        }
    }
    Ok(())
}
