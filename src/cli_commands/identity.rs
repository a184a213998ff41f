use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Use an existing bearer token instead of the device flow
    #[arg(long)]
    pub(crate) token: Option<String>,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
