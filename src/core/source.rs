//! Directory enumeration seam used by the tree builder.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::error::CoreError;

/// Name used for directories without a final component, such as `/`.
pub const UNNAMED_ROOT: &str = "root";

/// The kind of a directory entry as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything else (symlinks, sockets, devices). Skipped by the builder.
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone)]
pub struct SourceEntry<H> {
    pub name: String,
    pub kind: EntryKind,
    pub handle: H,
}

/// Something that can list directories, recursively, through opaque handles.
///
/// Listings are unordered; ordering is the tree builder's job.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    type Handle: Send + Sync;

    /// The directory's own name.
    fn name(&self, handle: &Self::Handle) -> String;

    /// Lists the immediate entries of a directory.
    async fn entries(
        &self,
        handle: &Self::Handle,
    ) -> Result<Vec<SourceEntry<Self::Handle>>, CoreError>;
}

/// Lists real directories through `tokio::fs`.
///
/// Entry kinds come from `DirEntry::file_type`, which does not follow symbolic
/// links, so links are reported as [`EntryKind::Other`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectorySource;

#[async_trait]
impl DirectorySource for FsDirectorySource {
    type Handle = PathBuf;

    fn name(&self, handle: &PathBuf) -> String {
        display_name(handle)
    }

    async fn entries(&self, handle: &PathBuf) -> Result<Vec<SourceEntry<PathBuf>>, CoreError> {
        let io_err = |e| CoreError::Io(e, handle.clone());
        let mut read_dir = tokio::fs::read_dir(handle).await.map_err(io_err)?;
        let mut entries = Vec::new();

        while let Some(entry) = read_dir.next_entry().await.map_err(io_err)? {
            let file_type = entry.file_type().await.map_err(io_err)?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };
            entries.push(SourceEntry {
                name: entry_name(&entry.file_name(), handle),
                kind,
                handle: entry.path(),
            });
        }

        Ok(entries)
    }
}

/// The last component of a path, or [`UNNAMED_ROOT`] for roots like `/`.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNNAMED_ROOT.to_string())
}

/// Converts an entry name to UTF-8, replacing invalid sequences with U+FFFD.
fn entry_name(name: &OsStr, parent: &Path) -> String {
    match name.to_str() {
        Some(name) => name.to_string(),
        None => {
            let lossy = name.to_string_lossy().into_owned();
            tracing::debug!(
                "Entry {:?} in {:?} is not valid UTF-8, listed as {:?}",
                name,
                parent,
                lossy
            );
            lossy
        }
    }
}
