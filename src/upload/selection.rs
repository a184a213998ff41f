use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Selection;

/// Turn local paths into selections, in argument order.
///
/// A directory stands for a whole-folder pick: its files are listed recursively in name order
/// with `relative_path` set to `<folder>/<path inside folder>`.
pub fn local_selections(paths: &[PathBuf]) -> Result<Vec<Selection>> {
    let mut out = Vec::new();
    for path in paths {
        let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
        // `.` and `..` have no file name of their own.
        let path = if path.file_name().is_none() {
            fs::canonicalize(path).with_context(|| format!("resolve {}", path.display()))?
        } else {
            path.clone()
        };
        let name = file_name(&path)?;
        if meta.is_dir() {
            walk_dir(&path, &name, &mut out)?;
        } else {
            out.push(Selection::file(path, name));
        }
    }
    Ok(out)
}

fn walk_dir(dir: &Path, prefix: &str, out: &mut Vec<Selection>) -> Result<()> {
    let mut children = fs::read_dir(dir)
        .with_context(|| format!("read dir {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("read dir entries {}", dir.display()))?;
    children.sort_by_key(|e| e.file_name());

    for child in children {
        let path = child.path();
        let name = file_name(&path)?;
        let rel = format!("{}/{}", prefix, name);
        let ft = child
            .file_type()
            .with_context(|| format!("stat {}", path.display()))?;
        if ft.is_dir() {
            walk_dir(&path, &rel, out)?;
        } else if ft.is_file() {
            out.push(Selection {
                name,
                relative_path: Some(rel),
                source: path,
            });
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .with_context(|| format!("{} has no file name", path.display()))?;
    name.to_str()
        .map(str::to_string)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))
}
