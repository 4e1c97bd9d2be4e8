//! Defines the central, mutable state of the application.

use crate::config::AppConfig;
use crate::core::Tree;
use std::path::PathBuf;
use tokio::task::JoinHandle;

pub const READY_MESSAGE: &str = "Ready.";

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared access
/// from the main event loop, IPC handlers and the build task.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Where the config is persisted. `None` uses the platform config file.
    pub config_path: Option<PathBuf>,
    /// The absolute path of the picked directory.
    pub current_path: String,
    /// The tree of the last completed build, if any.
    pub tree: Option<Tree>,
    /// The category pattern handed to the classifier on export.
    pub pattern: String,
    /// `true` while a directory is being enumerated.
    pub is_building: bool,
    pub status_message: String,
    /// Incremented on every pick. A build only applies its result while its
    /// generation is still current.
    pub pick_generation: u64,
    /// A handle to the running build task, allowing it to be aborted.
    pub build_task: Option<JoinHandle<()>>,
}

impl Default for AppState {
    /// Creates a default `AppState` instance, loading the configuration from disk.
    fn default() -> Self {
        Self::with_config(AppConfig::load().unwrap_or_default(), None)
    }
}

impl AppState {
    pub fn with_config(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            current_path: String::new(),
            tree: None,
            pattern: String::new(),
            is_building: false,
            status_message: READY_MESSAGE.to_string(),
            pick_generation: 0,
            build_task: None,
        }
    }

    /// Aborts the running build, if any. Its result will be discarded even if
    /// it already finished enumerating.
    pub fn cancel_current_build(&mut self) {
        if let Some(handle) = self.build_task.take() {
            tracing::info!("Aborting build for generation {}", self.pick_generation);
            handle.abort();
        }
        if self.is_building {
            self.pick_generation += 1;
            self.is_building = false;
            self.status_message = "Build cancelled.".to_string();
        }
    }

    /// Resets all state related to a loaded directory.
    pub fn reset_directory_state(&mut self) {
        self.cancel_current_build();
        self.current_path.clear();
        self.tree = None;
        self.pattern.clear();
        self.status_message = READY_MESSAGE.to_string();
    }

    /// Persists the config, logging instead of failing.
    pub fn save_config(&self) {
        if let Err(e) = crate::config::settings::save_config(&self.config, self.config_path.as_deref())
        {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}
