use reqwest::blocking::Response;

use crate::model::{RepoRef, check_repo_path};

use super::{ApiError, RemoteClient};

pub(super) const ACCEPT: &str = "application/vnd.github+json";

impl RemoteClient {
    pub(super) fn ensure_ok(&self, resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn contents_url(&self, repo: &RepoRef, path: &str) -> Result<String, ApiError> {
        if [&repo.owner, &repo.name].iter().any(|s| s.as_str() == "." || s.as_str() == "..") {
            return Err(ApiError::InvalidPath(repo.to_string()));
        }
        let encoded = encode_path(path)?;
        let base = format!(
            "/repos/{}/{}/contents",
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.name)
        );
        if encoded.is_empty() {
            Ok(self.url(&base))
        } else {
            Ok(self.url(&format!("{}/{}", base, encoded)))
        }
    }
}

/// Percent-encode each segment of a repository path, keeping the `/` separators.
///
/// `.` and `..` segments are refused; percent-encoding leaves them as they are.
pub(super) fn encode_path(path: &str) -> Result<String, ApiError> {
    check_repo_path(path).map_err(|e| ApiError::InvalidPath(e.to_string()))?;
    let encoded = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    Ok(encoded)
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
