use super::content::{
    handle_cat_command, handle_ls_command, handle_put_command, handle_rm_command,
    handle_shell_command, handle_upload_command,
};
use super::identity::{handle_login_command, handle_logout_command, handle_whoami_command};
use super::repos::handle_repos_command;
use super::*;

pub(super) fn handle_command(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(ctx, args.token)?,
        Commands::Logout => handle_logout_command(ctx)?,
        Commands::Whoami(args) => handle_whoami_command(ctx, args.json)?,
        Commands::Repos { command } => handle_repos_command(ctx, command)?,
        Commands::Ls(args) => handle_ls_command(ctx, args.repo, args.path, args.json)?,
        Commands::Cat(args) => handle_cat_command(ctx, args.repo, args.path)?,
        Commands::Put(args) => {
            handle_put_command(ctx, args.repo, args.path, args.from, args.message)?
        }
        Commands::Rm(args) => handle_rm_command(ctx, args.repo, args.path, args.message)?,
        Commands::Upload(args) => handle_upload_command(ctx, args.repo, args.dir, args.files)?,
        Commands::Shell(args) => handle_shell_command(ctx, args.repo)?,
    }
    Ok(())
}
