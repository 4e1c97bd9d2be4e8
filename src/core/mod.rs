//! Core tree, ordering and export logic, independent of the UI.

pub mod builder;
pub mod classifier;
pub mod csv_output;
pub mod error;
pub mod export;
pub mod flatten;
pub mod layout;
pub mod natural;
pub mod source;
pub mod tree;

pub use builder::TreeBuilder;
pub use classifier::{CategoryClassifier, PathClassifier, DIR_PLACEHOLDER};
pub use csv_output::write_table;
pub use error::CoreError;
pub use export::{CsvExport, CsvExporter};
pub use flatten::ExportFlattener;
pub use layout::LayoutSizer;
pub use natural::{natural_cmp, natural_cmp_segments, NameOrdering, NaturalOrdering};
pub use source::{
    display_name, DirectorySource, EntryKind, FsDirectorySource, SourceEntry, UNNAMED_ROOT,
};
pub use tree::{Node, NodeId, NodeKind, Tree};
