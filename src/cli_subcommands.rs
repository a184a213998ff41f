use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ReposCommands {
    /// List repositories, most recently updated first
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a repository
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Make the repository private
        #[arg(long)]
        private: bool,
        /// Initialize with a README
        #[arg(long)]
        readme: bool,
        /// .gitignore template (implies --readme)
        #[arg(long, value_name = "TEMPLATE")]
        gitignore: Option<String>,
        /// License template, e.g. mit (implies --readme)
        #[arg(long, value_name = "TEMPLATE")]
        license: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}
