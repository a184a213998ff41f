use repodeck::model::CreateRepoOptions;

use super::time_utils::fmt_updated;
use super::*;

pub(super) fn handle_repos_command(ctx: &AppContext, command: ReposCommands) -> Result<()> {
    let client = session_client(ctx)?;
    match command {
        ReposCommands::List { json } => {
            let repos = client.list_repos()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&repos).context("serialize repos json")?
                );
            } else if repos.is_empty() {
                println!("No repositories");
            } else {
                let now = time::OffsetDateTime::now_utc();
                for r in repos {
                    let visibility = if r.private { "private" } else { "public" };
                    println!(
                        "{:<40} {:<8} {}",
                        r.full_name,
                        visibility,
                        fmt_updated(&r.updated_at, now)
                    );
                    if let Some(desc) = r.description.filter(|d| !d.is_empty()) {
                        println!("    {}", desc);
                    }
                }
            }
        }
        ReposCommands::Create {
            name,
            description,
            private,
            readme,
            gitignore,
            license,
            json,
        } => {
            let opts = CreateRepoOptions {
                name,
                description,
                private,
                initialize_with_readme: readme,
                gitignore_template: gitignore,
                license_template: license,
            };
            let created = client.create_repo(&opts)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&created).context("serialize repo create json")?
                );
            } else {
                println!("Created repo {}", created.full_name);
            }
        }
    }
    Ok(())
}
