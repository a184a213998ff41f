use std::path::PathBuf;

use clap::Args;

use repodeck::model::RepoRef;

#[derive(Args)]
pub(crate) struct LsArgs {
    /// Repository as <owner>/<name>
    pub(crate) repo: RepoRef,
    /// Directory inside the repository (defaults to the root)
    #[arg(default_value = "")]
    pub(crate) path: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct CatArgs {
    pub(crate) repo: RepoRef,
    pub(crate) path: String,
}

#[derive(Args)]
pub(crate) struct PutArgs {
    pub(crate) repo: RepoRef,
    pub(crate) path: String,
    /// Local file whose contents are written
    #[arg(long, value_name = "FILE")]
    pub(crate) from: PathBuf,
    /// Commit message
    #[arg(short = 'm', long)]
    pub(crate) message: Option<String>,
}

#[derive(Args)]
pub(crate) struct RmArgs {
    pub(crate) repo: RepoRef,
    pub(crate) path: String,
    /// Commit message
    #[arg(short = 'm', long)]
    pub(crate) message: Option<String>,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    pub(crate) repo: RepoRef,
    /// Local files, folders or .zip archives, uploaded in the order given
    #[arg(required = true)]
    pub(crate) files: Vec<PathBuf>,
    /// Remote directory to upload into
    #[arg(long, default_value = "")]
    pub(crate) dir: String,
}

#[derive(Args)]
pub(crate) struct ShellArgs {
    pub(crate) repo: RepoRef,
}
