//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

use super::tree::NodeId;

/// The primary error type for the `core` module.
///
/// This enum encapsulates all possible errors that can occur during
/// core operations like tree building, flag toggling, classification and
/// CSV serialization.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from directory enumeration.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents an error that occurred when a Tokio task was joined.
    /// This is often due to a task panicking or being cancelled.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// A toggle or lookup addressed a node id that is not part of the tree.
    #[error("Unknown tree node: {0}")]
    UnknownNode(NodeId),

    /// An `enabled` toggle addressed a directory node.
    #[error("Tree node {0} is not a file")]
    NotAFileNode(NodeId),

    /// An `expanded` toggle addressed a file node.
    #[error("Tree node {0} is not a directory")]
    NotADirectoryNode(NodeId),

    /// The path classifier rejected its input.
    #[error("Classification failed: {0}")]
    Classification(String),

    /// The reading tokenizer could not be loaded or failed on a name.
    #[error("Reading lookup failed: {0}")]
    Reading(String),

    /// The classifier could not compile one of its derived matchers.
    #[error("Invalid derived pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Writing the CSV table failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// An export was requested while no directory tree is loaded.
    #[error("No directory tree is loaded")]
    NoTree,
}
