//! Reads and writes against the repository contents endpoint.

use anyhow::{Context, Result};

use crate::model::{ContentEntry, FileContent, RepoRef, sort_listing};
use crate::upload::ContentWriter;

use super::http_client::ACCEPT;
use super::types::{ContentView, ContentsResponse, DeleteContentRequest, PutContentRequest, PutContentResponse};
use super::{ApiError, RemoteClient};

impl RemoteClient {
    /// Sorted listing of a directory.
    ///
    /// A missing path and an empty repository both answer 404; either is an empty listing.
    pub fn list_dir(&self, repo: &RepoRef, path: &str) -> Result<Vec<ContentEntry>> {
        let view = match self.get_contents(repo, path) {
            Ok(v) => v,
            Err(err) if err.is_not_found() => return Ok(Vec::new()),
            Err(err) => return Err(err).with_context(|| format!("list {}:/{}", repo, path)),
        };
        let ContentsResponse::Listing(views) = view else {
            anyhow::bail!("{}:/{} is a file, not a directory", repo, path);
        };
        let mut entries: Vec<ContentEntry> = views.into_iter().map(ContentEntry::from).collect();
        sort_listing(&mut entries);
        Ok(entries)
    }

    pub fn read_file(&self, repo: &RepoRef, path: &str) -> Result<FileContent> {
        let view = self
            .get_contents(repo, path)
            .with_context(|| format!("read {}:/{}", repo, path))?;
        let ContentsResponse::Single(view) = view else {
            anyhow::bail!("{}:/{} is a directory", repo, path);
        };
        file_content(*view)
    }

    /// Current fingerprint of a file, or `None` if the path does not exist.
    pub fn file_sha(&self, repo: &RepoRef, path: &str) -> Result<Option<String>> {
        match self.get_contents(repo, path) {
            Ok(ContentsResponse::Single(view)) => Ok(Some(view.sha)),
            Ok(ContentsResponse::Listing(_)) => {
                anyhow::bail!("{}:/{} is a directory", repo, path)
            }
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err).with_context(|| format!("stat {}:/{}", repo, path)),
        }
    }

    /// Create (`sha == None`) or update a file and return its new fingerprint.
    ///
    /// Updates must carry the fingerprint last read for `path`; upstream rejects stale or
    /// missing ones.
    pub fn write_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content_b64: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<String> {
        tracing::debug!(%repo, path, update = sha.is_some(), "PUT contents");
        let resp = self
            .client
            .put(self.contents_url(repo, path)?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .json(&PutContentRequest {
                message,
                content: content_b64,
                sha,
            })
            .send()
            .map_err(ApiError::Transport)
            .context("write file")?;
        let out: PutContentResponse = self
            .ensure_ok(resp)?
            .json()
            .map_err(ApiError::Transport)
            .context("parse write response")?;
        Ok(out.content.sha)
    }

    pub fn delete_file(&self, repo: &RepoRef, path: &str, sha: &str, message: &str) -> Result<()> {
        tracing::debug!(%repo, path, "DELETE contents");
        let resp = self
            .client
            .delete(self.contents_url(repo, path)?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .json(&DeleteContentRequest { message, sha })
            .send()
            .map_err(ApiError::Transport)
            .context("delete file")?;
        self.ensure_ok(resp)?;
        Ok(())
    }

    fn get_contents(&self, repo: &RepoRef, path: &str) -> Result<ContentsResponse, ApiError> {
        tracing::debug!(%repo, path, "GET contents");
        let resp = self
            .client
            .get(self.contents_url(repo, path)?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()?;
        let out = self.ensure_ok(resp)?.json()?;
        Ok(out)
    }
}

fn file_content(view: ContentView) -> Result<FileContent> {
    if view.kind == "dir" {
        anyhow::bail!("{} is a directory", view.path);
    }
    if view.encoding.as_deref() == Some("none") {
        anyhow::bail!("{} is too large for the contents API", view.path);
    }
    let content: String = view
        .content
        .unwrap_or_default()
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();
    Ok(FileContent {
        path: view.path,
        sha: view.sha,
        content,
    })
}

/// A [`RemoteClient`] bound to one repository, as the upload pipeline sees it.
pub struct RepoContents<'a> {
    pub client: &'a RemoteClient,
    pub repo: &'a RepoRef,
}

impl ContentWriter for RepoContents<'_> {
    fn write_file(&self, path: &str, content_b64: &str, message: &str) -> Result<String> {
        self.client
            .write_file(self.repo, path, content_b64, message, None)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>> {
        self.client.list_dir(self.repo, path)
    }
}
