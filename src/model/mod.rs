mod config;
mod content;
mod paths;
mod repo;
mod session;

pub use self::config::{AppConfig, AppState, StoredSession};
pub use self::content::{ContentEntry, EntryKind, FileContent, UploadUnit};
pub use self::paths::{check_repo_path, join_path, parent_path, sort_listing};
pub use self::repo::{CreateRepoOptions, RepoRef, Repository};
pub use self::session::Session;
