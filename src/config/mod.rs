pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::DIR_PLACEHOLDER;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Category pattern suggested for a freshly built tree.
    pub default_pattern: String,
    /// Prepend the root directory name to `default_pattern`.
    pub prefix_pattern_with_root: bool,
    pub last_directory: Option<PathBuf>,
    pub auto_load_last_directory: bool,
    pub output_directory: Option<PathBuf>,
    pub row_height_px: u32,
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// The pattern a new tree named `root_name` starts with.
    pub fn initial_pattern(&self, root_name: &str) -> String {
        if self.prefix_pattern_with_root {
            format!("{}{}", root_name, self.default_pattern)
        } else {
            self.default_pattern.clone()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_pattern: format!("_{}", DIR_PLACEHOLDER),
            prefix_pattern_with_root: true,
            last_directory: None,
            auto_load_last_directory: false,
            output_directory: dirs::desktop_dir(),
            row_height_px: 40,
            window_size: (1000.0, 760.0),
            window_position: (100.0, 100.0),
        }
    }
}
