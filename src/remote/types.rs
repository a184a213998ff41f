//! DTOs and payload types for remote API requests/responses.

use serde::{Deserialize, Serialize};

use crate::model::{ContentEntry, EntryKind, Repository};

#[derive(Debug, Deserialize)]
pub(super) struct UpstreamMessage {
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) errors: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwnerView {
    pub(super) login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RepoView {
    pub(super) id: u64,
    pub(super) full_name: String,
    pub(super) name: String,
    pub(super) owner: OwnerView,
    #[serde(default)]
    pub(super) private: bool,
    #[serde(default)]
    pub(super) default_branch: Option<String>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) updated_at: Option<String>,
}

impl From<RepoView> for Repository {
    fn from(v: RepoView) -> Self {
        Repository {
            id: v.id,
            full_name: v.full_name,
            name: v.name,
            owner_login: v.owner.login,
            private: v.private,
            default_branch: v.default_branch,
            description: v.description,
            updated_at: v.updated_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateRepoRequest<'a> {
    pub(super) name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) description: Option<&'a str>,
    pub(super) private: bool,
    pub(super) auto_init: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) gitignore_template: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) license_template: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentView {
    pub(super) name: String,
    pub(super) path: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(default)]
    pub(super) size: u64,
    pub(super) sha: String,
    #[serde(default)]
    pub(super) content: Option<String>,
    #[serde(default)]
    pub(super) encoding: Option<String>,
}

impl From<ContentView> for ContentEntry {
    fn from(v: ContentView) -> Self {
        // Symlinks and submodules are shown as files.
        let kind = if v.kind == "dir" {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        ContentEntry {
            path: v.path,
            name: v.name,
            kind,
            size: v.size,
            sha: v.sha,
        }
    }
}

/// The contents endpoint answers with an array for directories and an object for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ContentsResponse {
    Listing(Vec<ContentView>),
    Single(Box<ContentView>),
}

#[derive(Debug, Serialize)]
pub(super) struct PutContentRequest<'a> {
    pub(super) message: &'a str,
    pub(super) content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PutContentResponse {
    pub(super) content: ContentView,
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteContentRequest<'a> {
    pub(super) message: &'a str,
    pub(super) sha: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeviceCodeResponse {
    pub(super) device_code: String,
    pub(super) user_code: String,
    pub(super) verification_uri: String,
    pub(super) expires_in: u64,
    #[serde(default)]
    pub(super) interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccessTokenResponse {
    #[serde(default)]
    pub(super) access_token: Option<String>,
    #[serde(default)]
    pub(super) error: Option<String>,
    #[serde(default)]
    pub(super) error_description: Option<String>,
    #[serde(default)]
    pub(super) interval: Option<u64>,
}
