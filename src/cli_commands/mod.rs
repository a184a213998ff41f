use clap::Subcommand;

use crate::ReposCommands;

pub(crate) mod content;
pub(crate) mod identity;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sign in (device authorization flow, or an existing token)
    Login(identity::LoginArgs),

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in identity
    Whoami(identity::WhoamiArgs),

    /// List or create repositories
    Repos {
        #[command(subcommand)]
        command: ReposCommands,
    },

    /// List a directory
    Ls(content::LsArgs),

    /// Print a file
    Cat(content::CatArgs),

    /// Create a file, or update it from its current remote version
    Put(content::PutArgs),

    /// Delete a file
    Rm(content::RmArgs),

    /// Upload files, folders and .zip archives into a directory
    Upload(content::UploadArgs),

    /// Browse a repository interactively
    Shell(content::ShellArgs),
}
