use std::io::Write;
use std::path::PathBuf;

use repodeck::codec::{decode_base64, encode_base64};
use repodeck::model::RepoRef;
use repodeck::remote::RepoContents;
use repodeck::shell::{Shell, print_listing};
use repodeck::upload::{local_selections, upload};

use super::*;

pub(super) fn handle_ls_command(
    ctx: &AppContext,
    repo: RepoRef,
    path: String,
    json: bool,
) -> Result<()> {
    let client = session_client(ctx)?;
    let entries = client.list_dir(&repo, &path)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("serialize listing json")?
        );
        return Ok(());
    }
    print_listing(&entries, &mut std::io::stdout().lock())
}

pub(super) fn handle_cat_command(ctx: &AppContext, repo: RepoRef, path: String) -> Result<()> {
    let client = session_client(ctx)?;
    let file = client.read_file(&repo, &path)?;
    let bytes = decode_base64(&file.content).with_context(|| format!("decode {}", path))?;
    std::io::stdout()
        .lock()
        .write_all(&bytes)
        .context("write file to stdout")?;
    Ok(())
}

pub(super) fn handle_put_command(
    ctx: &AppContext,
    repo: RepoRef,
    path: String,
    from: PathBuf,
    message: Option<String>,
) -> Result<()> {
    let client = session_client(ctx)?;
    let bytes = std::fs::read(&from).with_context(|| format!("read {}", from.display()))?;

    // Updating an existing path needs its current fingerprint.
    let sha = client.file_sha(&repo, &path)?;
    let message = message.unwrap_or_else(|| match sha {
        Some(_) => format!("Update {}", path),
        None => format!("Create {}", path),
    });
    let new_sha = client.write_file(&repo, &path, &encode_base64(&bytes), &message, sha.as_deref())?;
    println!("{}", new_sha);
    Ok(())
}

pub(super) fn handle_rm_command(
    ctx: &AppContext,
    repo: RepoRef,
    path: String,
    message: Option<String>,
) -> Result<()> {
    let client = session_client(ctx)?;
    let sha = client
        .file_sha(&repo, &path)?
        .with_context(|| format!("no such file: {}", path))?;
    let message = message.unwrap_or_else(|| format!("Delete {}", path));
    client.delete_file(&repo, &path, &sha, &message)?;
    println!("Deleted {}", path);
    Ok(())
}

pub(super) fn handle_upload_command(
    ctx: &AppContext,
    repo: RepoRef,
    dir: String,
    files: Vec<PathBuf>,
) -> Result<()> {
    let client = session_client(ctx)?;
    let selections = local_selections(&files)?;
    let writer = RepoContents {
        client: &client,
        repo: &repo,
    };

    let report = upload(&writer, &dir, selections).run_to_completion(|event| {
        println!("{}", event.status_text());
    });
    if let Some(listing) = &report.listing {
        print_listing(listing, &mut std::io::stdout().lock())?;
    }
    if !report.status.is_completed() {
        anyhow::bail!(
            "{} of the selected files were uploaded before the failure",
            report.uploaded.len()
        );
    }
    Ok(())
}

pub(super) fn handle_shell_command(ctx: &AppContext, repo: RepoRef) -> Result<()> {
    let client = session_client(ctx)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Shell::new(&client, repo).run(stdin.lock(), &mut stdout)
}
