//! Archive expansion and sequential upload of local selections.
//!
//! A run writes one file per step, in selection order, with archives expanded in place. The
//! first failed write stops the run; files written before it stay committed. The directory
//! listing is refreshed once at the end either way.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::codec::encode_base64;
use crate::model::{ContentEntry, UploadUnit, check_repo_path, join_path};

mod archive;
mod selection;

pub use self::archive::{ArchiveEntry, ArchiveSource, ZipSource};
pub use self::selection::local_selections;

pub const ARCHIVE_SUFFIX: &str = ".zip";

/// The two remote operations an upload needs, scoped to one repository.
pub trait ContentWriter {
    /// Create `path` and return its new fingerprint.
    fn write_file(&self, path: &str, content_b64: &str, message: &str) -> Result<String>;

    fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>>;
}

/// One locally picked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    /// Set for files picked as part of a whole folder, e.g. `site/css/main.css`.
    pub relative_path: Option<String>,
    pub source: PathBuf,
}

impl Selection {
    pub fn file(source: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relative_path: None,
            source: source.into(),
        }
    }

    pub fn is_archive(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(ARCHIVE_SUFFIX)
    }

    fn target_name(&self) -> &str {
        self.relative_path.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    Completed,
    Failed(String),
}

impl UploadStatus {
    pub fn message(&self) -> String {
        match self {
            UploadStatus::Completed => "Upload complete!".to_string(),
            UploadStatus::Failed(msg) => format!("Upload failed: {}", msg),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, UploadStatus::Completed)
    }
}

#[derive(Clone, Debug)]
pub struct UploadReport {
    pub status: UploadStatus,
    /// Target paths written, in commit order.
    pub uploaded: Vec<String>,
    /// Listing of the upload directory after the run; `None` if the refresh failed.
    pub listing: Option<Vec<ContentEntry>>,
}

#[derive(Clone, Debug)]
pub enum UploadEvent {
    Uploaded {
        /// 1-based count of files written so far.
        index: usize,
        path: String,
        sha: String,
    },
    Failed {
        target: String,
        message: String,
    },
    Finished(UploadReport),
}

impl UploadEvent {
    pub fn status_text(&self) -> String {
        match self {
            UploadEvent::Uploaded { index, path, .. } => format!("Uploaded {} ({})", path, index),
            UploadEvent::Failed { target, message } => {
                format!("Failed to upload {}: {}", target, message)
            }
            UploadEvent::Finished(report) => report.status.message(),
        }
    }
}

struct OpenArchive {
    label: String,
    source: Box<dyn ArchiveSource>,
    entries: std::vec::IntoIter<ArchiveEntry>,
}

struct StepFailure {
    target: String,
    error: anyhow::Error,
}

/// A single upload run.
///
/// Each call to `next` performs at most one write. The last event is always
/// [`UploadEvent::Finished`]; after it the run yields nothing and cannot be restarted.
pub struct UploadRun<'a, W: ContentWriter + ?Sized> {
    writer: &'a W,
    current_dir: String,
    selections: std::vec::IntoIter<Selection>,
    archive: Option<OpenArchive>,
    uploaded: Vec<String>,
    failure: Option<String>,
    finished: bool,
}

pub fn upload<'a, W: ContentWriter + ?Sized>(
    writer: &'a W,
    current_dir: &str,
    selections: Vec<Selection>,
) -> UploadRun<'a, W> {
    UploadRun {
        writer,
        current_dir: current_dir.trim_matches('/').to_string(),
        selections: selections.into_iter(),
        archive: None,
        uploaded: Vec::new(),
        failure: None,
        finished: false,
    }
}

impl<W: ContentWriter + ?Sized> UploadRun<'_, W> {
    /// Drive the run to its end, handing every event to `on_event`.
    pub fn run_to_completion(mut self, mut on_event: impl FnMut(&UploadEvent)) -> UploadReport {
        while let Some(event) = self.next() {
            on_event(&event);
            if let UploadEvent::Finished(report) = event {
                return report;
            }
        }
        UploadReport {
            status: UploadStatus::Failed("upload run already finished".to_string()),
            uploaded: Vec::new(),
            listing: None,
        }
    }

    fn next_unit(&mut self) -> Result<Option<UploadUnit>, StepFailure> {
        loop {
            if let Some(open) = self.archive.as_mut() {
                if let Some(entry) = open.entries.next() {
                    if entry.is_dir {
                        continue;
                    }
                    if let Err(error) = archive::check_entry_name(&entry.name) {
                        return Err(StepFailure {
                            target: entry.name.clone(),
                            error: error.context(format!("refusing entry of {}", open.label)),
                        });
                    }
                    let target_path = join_path(&self.current_dir, &entry.name);
                    let bytes = open.source.read(&entry).map_err(|error| StepFailure {
                        target: target_path.clone(),
                        error: error.context(format!("read {} from {}", entry.name, open.label)),
                    })?;
                    return Ok(Some(UploadUnit { target_path, bytes }));
                }
                self.archive = None;
            }

            let Some(sel) = self.selections.next() else {
                return Ok(None);
            };

            if sel.is_archive() {
                let mut source = archive::open(&sel.source).map_err(|error| StepFailure {
                    target: sel.name.clone(),
                    error,
                })?;
                let entries = source.entries().map_err(|error| StepFailure {
                    target: sel.name.clone(),
                    error,
                })?;
                tracing::info!(archive = %sel.name, entries = entries.len(), "expanding archive");
                self.archive = Some(OpenArchive {
                    label: sel.name,
                    source,
                    entries: entries.into_iter(),
                });
                continue;
            }

            let target_path = join_path(&self.current_dir, sel.target_name());
            check_repo_path(&target_path).map_err(|error| StepFailure {
                target: target_path.clone(),
                error,
            })?;
            let bytes = std::fs::read(&sel.source)
                .with_context(|| format!("read {}", sel.source.display()))
                .map_err(|error| StepFailure {
                    target: target_path.clone(),
                    error,
                })?;
            return Ok(Some(UploadUnit { target_path, bytes }));
        }
    }

    fn fail(&mut self, target: String, error: anyhow::Error) -> UploadEvent {
        let message = format!("{:#}", error);
        tracing::warn!(target = %target, error = %message, "upload stopped");
        self.failure = Some(format!("{}: {}", target, message));
        self.archive = None;
        self.selections = Vec::new().into_iter();
        UploadEvent::Failed { target, message }
    }

    fn finish(&mut self) -> UploadEvent {
        self.finished = true;
        let listing = match self.writer.list_dir(&self.current_dir) {
            Ok(entries) => Some(entries),
            Err(err) => {
                let message = format!("{:#}", err);
                tracing::warn!(dir = %self.current_dir, error = %message, "listing refresh failed");
                None
            }
        };
        let status = match self.failure.take() {
            Some(msg) => UploadStatus::Failed(msg),
            None => UploadStatus::Completed,
        };
        UploadEvent::Finished(UploadReport {
            status,
            uploaded: std::mem::take(&mut self.uploaded),
            listing,
        })
    }
}

impl<W: ContentWriter + ?Sized> Iterator for UploadRun<'_, W> {
    type Item = UploadEvent;

    fn next(&mut self) -> Option<UploadEvent> {
        if self.finished {
            return None;
        }
        if self.failure.is_none() {
            match self.next_unit() {
                Ok(Some(unit)) => {
                    let message = format!("Upload {}", unit.target_path);
                    let content = encode_base64(&unit.bytes);
                    return match self.writer.write_file(&unit.target_path, &content, &message) {
                        Ok(sha) => {
                            tracing::info!(path = %unit.target_path, bytes = unit.bytes.len(), "uploaded");
                            self.uploaded.push(unit.target_path.clone());
                            Some(UploadEvent::Uploaded {
                                index: self.uploaded.len(),
                                path: unit.target_path,
                                sha,
                            })
                        }
                        Err(err) => Some(self.fail(unit.target_path, err)),
                    };
                }
                Ok(None) => {}
                Err(StepFailure { target, error }) => return Some(self.fail(target, error)),
            }
        }
        Some(self.finish())
    }
}

#[cfg(test)]
#[path = "tests/upload/pipeline_tests.rs"]
mod tests;
