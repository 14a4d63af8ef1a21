//! Container source abstraction
//!
//! The console keeps each shared-font archive inside a system title; this
//! crate only sees that storage through the two traits below. Two sources
//! are provided: [`DirectorySource`] for extracted archive dumps on disk,
//! and [`MemorySource`] for embedded data and tests.

use crate::error::{Error, Result};
use crate::types::TitleId;
use memmap2::MmapOptions;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use tracing::debug;

/// A resolved entry inside an open container.
#[derive(Debug, Clone)]
pub struct EntryHandle {
    /// Byte length of the entry.
    pub size: u64,
    /// Source-specific key identifying the entry (normalized path).
    key: String,
}

/// An open container: a read-only archive of named entries.
pub trait Container {
    /// Resolve an absolute entry path to a handle.
    fn resolve(&self, path: &str) -> Result<EntryHandle>;

    /// Read `buf.len()` bytes of the entry starting at `offset`.
    fn read_at(&self, entry: &EntryHandle, offset: u64, buf: &mut [u8]) -> Result<()>;
}

/// Opens containers by system title ID.
pub trait ContainerSource {
    fn open(&self, title_id: TitleId) -> Result<Box<dyn Container + '_>>;
}

fn check_bounds(entry: &EntryHandle, offset: u64, length: usize) -> Result<()> {
    if offset + length as u64 > entry.size {
        return Err(Error::ReadOutOfBounds {
            offset,
            length,
            size: entry.size,
        });
    }
    Ok(())
}

/// Container source backed by a directory of extracted archive dumps.
///
/// The root holds one subdirectory per title ID (16 uppercase hex digits),
/// each containing the archive's entries as plain files:
///
/// ```text
/// root/0100000000000811/nintendo_udsg-r_std_003.bfttf
/// root/0100000000000810/nintendo_ext_003.bfttf
/// ```
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContainerSource for DirectorySource {
    fn open(&self, title_id: TitleId) -> Result<Box<dyn Container + '_>> {
        let dir = self.root.join(title_id.to_string());
        if !dir.is_dir() {
            return Err(Error::ContainerNotFound(title_id));
        }

        debug!("opened container {} at {:?}", title_id, dir);
        Ok(Box::new(DirectoryContainer { title_id, dir }))
    }
}

struct DirectoryContainer {
    title_id: TitleId,
    dir: PathBuf,
}

impl DirectoryContainer {
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Container for DirectoryContainer {
    fn resolve(&self, path: &str) -> Result<EntryHandle> {
        let key = path.trim_start_matches('/').to_string();
        let metadata =
            std::fs::metadata(self.entry_path(&key)).map_err(|_| Error::EntryNotFound {
                title_id: self.title_id,
                path: path.to_string(),
            })?;
        if !metadata.is_file() {
            return Err(Error::EntryNotFound {
                title_id: self.title_id,
                path: path.to_string(),
            });
        }

        Ok(EntryHandle {
            size: metadata.len(),
            key,
        })
    }

    fn read_at(&self, entry: &EntryHandle, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_bounds(entry, offset, buf.len())?;

        let mut file = File::open(self.entry_path(&entry.key))?;

        // Fast path: memory-mapped access, falling back to a plain seek and
        // read when mapping fails.
        match unsafe { MmapOptions::new().map(&file) } {
            Ok(mmap) => {
                let start = offset as usize;
                buf.copy_from_slice(&mmap[start..start + buf.len()]);
            }
            Err(e) => {
                debug!("mmap failed for {:?}, using file reader: {e}", entry.key);
                file.seek(SeekFrom::Start(offset))?;
                file.read_exact(buf)?;
            }
        }

        Ok(())
    }
}

/// In-memory container source keyed by `(title ID, entry path)`.
#[derive(Default)]
pub struct MemorySource {
    containers: HashMap<TitleId, HashMap<String, Vec<u8>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, creating its container if needed.
    pub fn insert(&mut self, title_id: TitleId, path: &str, data: Vec<u8>) {
        self.containers
            .entry(title_id)
            .or_default()
            .insert(path.trim_start_matches('/').to_string(), data);
    }
}

impl ContainerSource for MemorySource {
    fn open(&self, title_id: TitleId) -> Result<Box<dyn Container + '_>> {
        let entries = self
            .containers
            .get(&title_id)
            .ok_or(Error::ContainerNotFound(title_id))?;
        Ok(Box::new(MemoryContainer { title_id, entries }))
    }
}

struct MemoryContainer<'a> {
    title_id: TitleId,
    entries: &'a HashMap<String, Vec<u8>>,
}

impl Container for MemoryContainer<'_> {
    fn resolve(&self, path: &str) -> Result<EntryHandle> {
        let key = path.trim_start_matches('/');
        let data = self.entries.get(key).ok_or_else(|| Error::EntryNotFound {
            title_id: self.title_id,
            path: path.to_string(),
        })?;
        Ok(EntryHandle {
            size: data.len() as u64,
            key: key.to_string(),
        })
    }

    fn read_at(&self, entry: &EntryHandle, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_bounds(entry, offset, buf.len())?;
        let data = self.entries.get(&entry.key).ok_or_else(|| Error::EntryNotFound {
            title_id: self.title_id,
            path: entry.key.clone(),
        })?;
        let start = offset as usize;
        buf.copy_from_slice(&data[start..start + buf.len()]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_resolves_with_and_without_leading_slash() {
        let mut source = MemorySource::new();
        source.insert(TitleId(1), "/font.bfttf", vec![1, 2, 3, 4]);

        let container = source.open(TitleId(1)).unwrap();
        assert_eq!(container.resolve("/font.bfttf").unwrap().size, 4);
        assert_eq!(container.resolve("font.bfttf").unwrap().size, 4);
        assert!(matches!(
            container.resolve("/missing.bfttf"),
            Err(Error::EntryNotFound { .. })
        ));
    }

    #[test]
    fn memory_source_reads_are_bounds_checked() {
        let mut source = MemorySource::new();
        source.insert(TitleId(1), "/font.bfttf", vec![9, 8, 7, 6]);

        let container = source.open(TitleId(1)).unwrap();
        let entry = container.resolve("/font.bfttf").unwrap();

        let mut buf = [0u8; 2];
        container.read_at(&entry, 1, &mut buf).unwrap();
        assert_eq!(buf, [8, 7]);

        let mut too_big = [0u8; 8];
        assert!(matches!(
            container.read_at(&entry, 0, &mut too_big),
            Err(Error::ReadOutOfBounds { offset: 0, length: 8, size: 4 })
        ));
    }

    #[test]
    fn unknown_container_is_reported() {
        let source = MemorySource::new();
        assert!(matches!(
            source.open(TitleId(0x42)),
            Err(Error::ContainerNotFound(TitleId(0x42)))
        ));
    }
}
