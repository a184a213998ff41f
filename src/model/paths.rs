use anyhow::Result;

use super::ContentEntry;

/// Join a remote directory and a relative name with exactly one `/`.
///
/// An empty directory yields the name unchanged, so top-level paths never start with `/`.
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        dir.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Parent of a remote path; the root is its own parent.
pub fn parent_path(path: &str) -> String {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// Fail if any segment of `path` is `.` or `..`.
///
/// Paths end up in request URLs, where such segments would be resolved against the
/// endpoint instead of the repository tree.
pub fn check_repo_path(path: &str) -> Result<()> {
    if let Some(seg) = path.split('/').find(|s| *s == "." || *s == "..") {
        anyhow::bail!("path {:?} contains a {:?} segment", path, seg);
    }
    Ok(())
}

/// Directories before files, then case-sensitive byte order by name.
pub fn sort_listing(entries: &mut [ContentEntry]) {
    entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
#[path = "../tests/model/paths_tests.rs"]
mod tests;
