//! Orchestrates flatten, classify and serialize for a CSV export.

use super::classifier::PathClassifier;
use super::csv_output::write_table;
use super::error::CoreError;
use super::flatten::ExportFlattener;
use super::tree::Tree;

/// A generated CSV document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// `<root name>.csv`
    pub file_name: String,
    pub content: String,
    pub row_count: usize,
}

/// A utility struct for producing CSV exports from a tree.
///
/// This struct is stateless and provides methods as associated functions.
pub struct CsvExporter;

impl CsvExporter {
    /// Flattens the tree's enabled files, classifies them with `pattern` and
    /// serializes the resulting table.
    pub fn generate<C: PathClassifier + ?Sized>(
        tree: Option<&Tree>,
        pattern: &str,
        classifier: &C,
    ) -> Result<CsvExport, CoreError> {
        let tree = tree.ok_or(CoreError::NoTree)?;

        let paths = ExportFlattener::flatten(tree);
        tracing::debug!("Flattened {} enabled files for export", paths.len());

        let table = classifier.classify(&paths, pattern)?;
        let content = write_table(&table)?;

        Ok(CsvExport {
            file_name: format!("{}.csv", tree.root_name()),
            content,
            row_count: table.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::TreeBuilder;
    use crate::core::classifier::CategoryClassifier;
    use crate::core::natural::NaturalOrdering;
    use crate::utils::test_helpers::MemoryDirectorySource;
    use std::sync::Mutex;

    /// Records its input and echoes each path back as a single-cell row.
    #[derive(Default)]
    struct RecordingClassifier {
        seen: Mutex<Vec<(Vec<Vec<String>>, String)>>,
    }

    impl PathClassifier for RecordingClassifier {
        fn classify(
            &self,
            paths: &[Vec<String>],
            pattern: &str,
        ) -> Result<Vec<Vec<String>>, CoreError> {
            self.seen
                .lock()
                .unwrap()
                .push((paths.to_vec(), pattern.to_string()));
            Ok(paths.iter().map(|p| vec![p.join("/")]).collect())
        }
    }

    struct FailingClassifier;

    impl PathClassifier for FailingClassifier {
        fn classify(&self, _: &[Vec<String>], _: &str) -> Result<Vec<Vec<String>>, CoreError> {
            Err(CoreError::Classification("pattern rejected".to_string()))
        }
    }

    async fn sample_tree() -> Tree {
        let source = MemoryDirectorySource::new("Album")
            .with_file("disc2/02.flac")
            .with_file("disc2/01.flac")
            .with_file("disc10/01.flac")
            .with_file("cover.jpg");
        TreeBuilder::new(&NaturalOrdering)
            .build(&source, &source.root())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_passes_flattened_paths_and_names_the_file() {
        let tree = sample_tree().await;
        let classifier = RecordingClassifier::default();

        let export = CsvExporter::generate(Some(&tree), "Album_${DIR}", &classifier).unwrap();

        assert_eq!(export.file_name, "Album.csv");
        assert_eq!(export.row_count, 4);
        assert_eq!(
            export.content,
            "\"disc2/01.flac\"\n\"disc2/02.flac\"\n\"disc10/01.flac\"\n\"cover.jpg\""
        );
        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, "Album_${DIR}");
    }

    #[tokio::test]
    async fn test_generate_with_category_classifier() {
        let tree = sample_tree().await;
        let classifier = CategoryClassifier::new().unwrap();

        let export = CsvExporter::generate(Some(&tree), "Album_${DIR}", &classifier).unwrap();

        insta::assert_snapshot!(export.content, @r###"
        "cover.jpg","cover","cover","cover","Album_"
        "disc2/01.flac","01","01","01","Album_disc2"
        "disc2/02.flac","02","02","02","Album_disc2"
        "disc10/01.flac","01","01","01","Album_disc10"
        "###);
    }

    #[tokio::test]
    async fn test_generate_without_tree_is_a_precondition_error() {
        let result = CsvExporter::generate(None, "${DIR}", &RecordingClassifier::default());
        assert!(matches!(result, Err(CoreError::NoTree)));
    }

    #[tokio::test]
    async fn test_classifier_errors_propagate() {
        let tree = sample_tree().await;
        let result = CsvExporter::generate(Some(&tree), "${DIR}", &FailingClassifier);
        assert!(matches!(result, Err(CoreError::Classification(_))));
    }

    #[tokio::test]
    async fn test_all_files_disabled_is_rejected_by_default_classifier() {
        let mut tree = sample_tree().await;
        for id in tree.depth_first() {
            if tree.get(id).unwrap().enabled() == Some(true) {
                tree.toggle_enabled(id).unwrap();
            }
        }
        let classifier = CategoryClassifier::new().unwrap();
        let result = CsvExporter::generate(Some(&tree), "${DIR}", &classifier);
        assert!(matches!(result, Err(CoreError::Classification(_))));
    }
}
