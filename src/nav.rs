//! Where the user currently is: repository, directory, open file and its edit buffer.
//!
//! Pure in-memory state. Nothing here talks to the network; callers fetch and hand results in.

use anyhow::Result;

use crate::codec::decode_utf8_base64;
use crate::model::{ContentEntry, FileContent, RepoRef, join_path, parent_path, sort_listing};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenFile {
    pub path: String,
    /// Fingerprint the buffer was loaded from; `None` for a file not yet created remotely.
    pub sha: Option<String>,
    pub buffer: String,
    pub dirty: bool,
}

#[derive(Clone, Debug, Default)]
pub struct NavState {
    repo: Option<RepoRef>,
    current_dir: String,
    listing: Vec<ContentEntry>,
    open_file: Option<OpenFile>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch repository; everything below it resets.
    pub fn select_repo(&mut self, repo: RepoRef) {
        self.repo = Some(repo);
        self.current_dir.clear();
        self.listing.clear();
        self.open_file = None;
    }

    pub fn repo(&self) -> Option<&RepoRef> {
        self.repo.as_ref()
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn listing(&self) -> &[ContentEntry] {
        &self.listing
    }

    pub fn set_listing(&mut self, mut entries: Vec<ContentEntry>) {
        sort_listing(&mut entries);
        self.listing = entries;
    }

    pub fn find(&self, name: &str) -> Option<&ContentEntry> {
        self.listing.iter().find(|e| e.name == name)
    }

    pub fn child_path(&self, name: &str) -> String {
        join_path(&self.current_dir, name)
    }

    /// Descend into `name`, which may be a nested relative path.
    pub fn enter(&mut self, name: &str) -> Result<()> {
        let name = name.trim_matches('/');
        if name.is_empty() {
            return Ok(());
        }
        if let Some(entry) = self.find(name)
            && !entry.is_dir()
        {
            anyhow::bail!("{} is not a directory", entry.path);
        }
        self.current_dir = self.child_path(name);
        self.listing.clear();
        Ok(())
    }

    /// Go to the parent directory. Returns `false` at the root.
    pub fn up(&mut self) -> bool {
        if self.current_dir.is_empty() {
            return false;
        }
        self.current_dir = parent_path(&self.current_dir);
        self.listing.clear();
        true
    }

    pub fn go_root(&mut self) {
        self.current_dir.clear();
        self.listing.clear();
    }

    pub fn open(&mut self, file: FileContent) -> Result<&OpenFile> {
        let buffer = decode_utf8_base64(&file.content)?;
        let open = self.open_file.insert(OpenFile {
            path: file.path,
            sha: Some(file.sha),
            buffer,
            dirty: false,
        });
        Ok(&*open)
    }

    /// Open an empty buffer for a file that does not exist remotely yet.
    pub fn open_new(&mut self, name: &str) -> &OpenFile {
        let path = self.child_path(name);
        self.open_file.insert(OpenFile {
            path,
            sha: None,
            buffer: String::new(),
            dirty: true,
        })
    }

    pub fn open_file(&self) -> Option<&OpenFile> {
        self.open_file.as_ref()
    }

    pub fn edit(&mut self, text: String) -> Result<()> {
        let Some(file) = self.open_file.as_mut() else {
            anyhow::bail!("no file is open");
        };
        if file.buffer != text {
            file.buffer = text;
            file.dirty = true;
        }
        Ok(())
    }

    /// Record a successful write of the open buffer.
    pub fn saved(&mut self, sha: String) {
        if let Some(file) = self.open_file.as_mut() {
            file.sha = Some(sha);
            file.dirty = false;
        }
        // The write changed the directory, so the listing's fingerprints are stale.
        self.listing.clear();
    }

    pub fn close(&mut self) -> Option<OpenFile> {
        self.open_file.take()
    }

    pub fn location(&self) -> String {
        match &self.repo {
            Some(repo) => format!("{}:/{}", repo, self.current_dir),
            None => format!("/{}", self.current_dir),
        }
    }
}

#[cfg(test)]
#[path = "tests/nav_tests.rs"]
mod tests;
