//! Repository listing and creation.

use anyhow::{Context, Result};

use crate::model::{CreateRepoOptions, Repository};

use super::http_client::ACCEPT;
use super::types::{CreateRepoRequest, RepoView};
use super::{ApiError, RemoteClient};

const PAGE_SIZE: &str = "100";

impl RemoteClient {
    /// Repositories visible to the token, most recently updated first.
    pub fn list_repos(&self) -> Result<Vec<Repository>> {
        tracing::debug!("GET /user/repos");
        let resp = self
            .client
            .get(self.url("/user/repos"))
            .query(&[("sort", "updated"), ("per_page", PAGE_SIZE)])
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .map_err(ApiError::Transport)
            .context("list repos")?;
        let repos: Vec<RepoView> = self
            .ensure_ok(resp)?
            .json()
            .map_err(ApiError::Transport)
            .context("parse repos")?;
        Ok(repos.into_iter().map(Repository::from).collect())
    }

    pub fn create_repo(&self, opts: &CreateRepoOptions) -> Result<Repository> {
        let name = opts.name.trim();
        if name.is_empty() {
            anyhow::bail!("repository name is required");
        }
        let body = CreateRepoRequest {
            name,
            description: opts.description.as_deref().filter(|d| !d.is_empty()),
            private: opts.private,
            auto_init: opts.auto_init(),
            gitignore_template: opts.gitignore_template.as_deref(),
            license_template: opts.license_template.as_deref(),
        };
        tracing::info!(name, private = opts.private, auto_init = body.auto_init, "creating repository");
        let resp = self
            .client
            .post(self.url("/user/repos"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .json(&body)
            .send()
            .map_err(ApiError::Transport)
            .context("create repo")?;
        let repo: RepoView = self
            .ensure_ok(resp)?
            .json()
            .map_err(ApiError::Transport)
            .context("parse created repo")?;
        Ok(repo.into())
    }
}
