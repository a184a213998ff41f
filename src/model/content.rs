use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    // Declaration order is listing order: directories first.
    Dir,
    File,
}

/// One node of a remote directory listing.
///
/// The `sha` is the upstream content fingerprint. It goes stale after any write or delete
/// under the same directory, so listings are re-fetched after every mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
    pub sha: String,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// A single file as returned by the contents endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub sha: String,
    /// Standard base64 with the upstream line wrapping already removed.
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadUnit {
    pub target_path: String,
    pub bytes: Vec<u8>,
}
