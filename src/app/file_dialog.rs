//! An abstraction layer for native file dialogs to enable testing.

use crate::config::AppConfig;
use std::path::PathBuf;

/// Defines a common interface for folder selection and save dialogs.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS dialog windows.
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select a single directory.
    fn pick_directory(&self) -> Option<PathBuf>;

    /// Opens a dialog to choose where an export is saved, suggesting
    /// `file_name` inside the configured output directory.
    fn save_csv_path(&self, config: &AppConfig, file_name: &str) -> Option<PathBuf>;
}

/// The production implementation that uses the `rfd` crate to show native OS dialogs.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new().pick_folder()
    }

    fn save_csv_path(&self, config: &AppConfig, file_name: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(file_name);
        if let Some(dir) = &config.output_directory {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }
}
