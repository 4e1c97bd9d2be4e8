use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Once;

use crate::core::{CoreError, DirectorySource, EntryKind, SourceEntry};

static LOGGING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
///
/// This function is wrapped in a `Once` block to ensure that the global
/// subscriber is set exactly one time, even when tests are run in parallel.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok(); // Ignore the error if it's already set by another crate.
    });
}

/// An in-memory directory listing for exercising the tree builder.
///
/// Handles are the segment paths below the root (the root is the empty path).
/// Listings keep insertion order, which stands in for the host's arbitrary
/// enumeration order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectorySource {
    root_name: String,
    listings: HashMap<Vec<String>, Vec<(String, EntryKind)>>,
    failing: HashSet<Vec<String>>,
}

impl MemoryDirectorySource {
    pub fn new(root_name: &str) -> Self {
        let mut listings = HashMap::new();
        listings.insert(Vec::new(), Vec::new());
        Self {
            root_name: root_name.to_string(),
            listings,
            failing: HashSet::new(),
        }
    }

    /// The handle of the root directory.
    pub fn root(&self) -> Vec<String> {
        Vec::new()
    }

    /// Adds a file at a `/`-separated path, creating missing parent directories.
    pub fn with_file(mut self, path: &str) -> Self {
        self.insert(path, EntryKind::File);
        self
    }

    /// Adds a directory at a `/`-separated path.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert(path, EntryKind::Directory);
        self
    }

    /// Adds an entry that is neither a file nor a directory.
    pub fn with_other(mut self, path: &str) -> Self {
        self.insert(path, EntryKind::Other);
        self
    }

    /// Makes listing the directory at `path` fail with a permission error.
    pub fn failing_at(mut self, path: &str) -> Self {
        self.failing.insert(split(path));
        self
    }

    fn insert(&mut self, path: &str, kind: EntryKind) {
        let segments = split(path);
        for (depth, name) in segments.iter().enumerate() {
            let is_last = depth + 1 == segments.len();
            let entry_kind = if is_last { kind } else { EntryKind::Directory };
            let listing = self.listings.entry(segments[..depth].to_vec()).or_default();
            if !listing.iter().any(|(existing, _)| existing == name) {
                listing.push((name.clone(), entry_kind));
            }
            if entry_kind == EntryKind::Directory {
                self.listings
                    .entry(segments[..=depth].to_vec())
                    .or_default();
            }
        }
    }
}

fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

#[async_trait]
impl DirectorySource for MemoryDirectorySource {
    type Handle = Vec<String>;

    fn name(&self, handle: &Vec<String>) -> String {
        handle
            .last()
            .cloned()
            .unwrap_or_else(|| self.root_name.clone())
    }

    async fn entries(&self, handle: &Vec<String>) -> Result<Vec<SourceEntry<Vec<String>>>, CoreError> {
        let display_path = || PathBuf::from(self.root_name.clone()).join(handle.join("/"));
        if self.failing.contains(handle) {
            return Err(CoreError::Io(
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
                display_path(),
            ));
        }
        let listing = self.listings.get(handle).ok_or_else(|| {
            CoreError::Io(
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
                display_path(),
            )
        })?;

        Ok(listing
            .iter()
            .map(|(name, kind)| {
                let mut child = handle.clone();
                child.push(name.clone());
                SourceEntry {
                    name: name.clone(),
                    kind: *kind,
                    handle: child,
                }
            })
            .collect())
    }
}
