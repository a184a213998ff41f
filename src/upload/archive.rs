use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};

const PREALLOC_LIMIT: u64 = 1 << 20;

/// One entry of an archive, in the order the container lists it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub index: usize,
    pub name: String,
    pub is_dir: bool,
}

/// Read access to an archive container.
pub trait ArchiveSource {
    fn entries(&mut self) -> Result<Vec<ArchiveEntry>>;

    fn read(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>>;
}

pub struct ZipSource<R> {
    archive: zip::ZipArchive<R>,
}

impl ZipSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Self::new(file).with_context(|| format!("read archive {}", path.display()))
    }
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).context("parse zip central directory")?;
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> ArchiveSource for ZipSource<R> {
    fn entries(&mut self) -> Result<Vec<ArchiveEntry>> {
        let mut out = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self
                .archive
                .by_index(index)
                .with_context(|| format!("zip entry {}", index))?;
            out.push(ArchiveEntry {
                index,
                name: file.name().to_string(),
                is_dir: file.is_dir(),
            });
        }
        Ok(out)
    }

    fn read(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_index(entry.index)
            .with_context(|| format!("zip entry {}", entry.name))?;
        // The declared size comes from the archive itself; don't trust it for allocation.
        let mut bytes = Vec::with_capacity(file.size().min(PREALLOC_LIMIT) as usize);
        file.read_to_end(&mut bytes)
            .with_context(|| format!("inflate {}", entry.name))?;
        Ok(bytes)
    }
}

/// Entry names are used as repository paths, so they must be plain relative paths.
pub(super) fn check_entry_name(name: &str) -> Result<()> {
    let unsafe_segment = name
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == ".." || seg.contains('\\'));
    if unsafe_segment {
        anyhow::bail!("archive entry {:?} is not a plain relative path", name);
    }
    Ok(())
}

pub(super) fn open(path: &Path) -> Result<Box<dyn ArchiveSource>> {
    Ok(Box::new(ZipSource::open(path)?))
}
