//! Background work: enumerating a picked directory into a `Tree`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::{notify, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use crate::core::{display_name, CoreError, FsDirectorySource, NaturalOrdering, TreeBuilder};

pub const BUILD_FAILED_MESSAGE: &str = "Could not read the selected directory.";
pub const NOT_A_DIRECTORY_MESSAGE: &str = "Dropped item is not a valid directory.";

/// Starts building the tree for `path`, superseding any build in progress.
///
/// A file path is resolved to its parent directory. The pick generation is
/// bumped so a superseded build that still completes is discarded.
pub fn start_build_on_path<P: EventProxy>(path: PathBuf, proxy: P, state: Arc<Mutex<AppState>>) {
    let directory_path = if path.is_dir() {
        path
    } else {
        path.parent().map(Path::to_path_buf).unwrap_or(path)
    };

    if !directory_path.is_dir() {
        tracing::warn!("{}", CoreError::NotADirectory(directory_path));
        proxy.send_event(UserEvent::ShowError(NOT_A_DIRECTORY_MESSAGE.to_string()));
        return;
    }

    let task_proxy = proxy.clone();
    let task_state = state.clone();
    with_state_and_notify(&state, &proxy, move |s| {
        s.cancel_current_build();
        s.pick_generation += 1;
        let generation = s.pick_generation;

        s.current_path = directory_path.to_string_lossy().to_string();
        s.tree = None;
        s.pattern.clear();
        s.is_building = true;
        s.status_message = format!("Reading {}...", display_name(&directory_path));

        s.config.last_directory = Some(directory_path.clone());
        s.save_config();

        tracing::info!(
            "Spawning build for {:?} (generation {})",
            directory_path,
            generation
        );
        let handle = tokio::spawn(build_tree_task(
            directory_path,
            generation,
            task_proxy,
            task_state,
        ));
        s.build_task = Some(handle);
    });
}

/// Enumerates `path` and installs the tree if `generation` is still current.
async fn build_tree_task<P: EventProxy>(
    path: PathBuf,
    generation: u64,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let result = TreeBuilder::new(&NaturalOrdering)
        .build(&FsDirectorySource, &path)
        .await;

    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    if state_guard.pick_generation != generation || !state_guard.is_building {
        tracing::warn!(
            "Discarding stale build of {:?} (generation {}, current {})",
            path,
            generation,
            state_guard.pick_generation
        );
        return;
    }

    state_guard.is_building = false;
    state_guard.build_task = None;

    match result {
        Ok(tree) => {
            tracing::info!(
                "Built tree for {:?}: {} nodes, {} files",
                path,
                tree.len(),
                tree.file_count()
            );
            state_guard.pattern = state_guard.config.initial_pattern(tree.root_name());
            state_guard.status_message = format!("Loaded {} files.", tree.file_count());
            state_guard.tree = Some(tree);
        }
        Err(e) => {
            tracing::error!("Failed to build tree for {:?}: {}", path, e);
            state_guard.status_message = BUILD_FAILED_MESSAGE.to_string();
            proxy.send_event(UserEvent::ShowError(BUILD_FAILED_MESSAGE.to_string()));
        }
    }

    notify(&state_guard, &proxy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[derive(Clone, Default)]
    struct RecordingProxy {
        events: Arc<Mutex<Vec<UserEvent>>>,
    }

    impl EventProxy for RecordingProxy {
        fn send_event(&self, event: UserEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn library() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("disc1")).unwrap();
        fs::write(dir.path().join("disc1/01.flac"), "").unwrap();
        dir
    }

    fn building_state(generation: u64, is_building: bool) -> Arc<Mutex<AppState>> {
        let mut state = AppState::with_config(AppConfig::default(), None);
        state.pick_generation = generation;
        state.is_building = is_building;
        state.status_message = "Reading...".to_string();
        Arc::new(Mutex::new(state))
    }

    #[tokio::test]
    #[traced_test]
    async fn test_result_of_superseded_generation_is_discarded() {
        let dir = library();
        let state = building_state(2, true);
        let proxy = RecordingProxy::default();

        build_tree_task(dir.path().to_path_buf(), 1, proxy.clone(), state.clone()).await;

        let state = state.lock().unwrap();
        assert!(state.tree.is_none());
        assert!(state.is_building);
        assert_eq!(state.pattern, "");
        assert_eq!(state.status_message, "Reading...");
        assert!(proxy.events.lock().unwrap().is_empty());
        assert!(logs_contain("Discarding stale build"));
    }

    #[tokio::test]
    async fn test_result_after_cancel_is_discarded() {
        let dir = library();
        let state = building_state(1, false);
        let proxy = RecordingProxy::default();

        build_tree_task(dir.path().to_path_buf(), 1, proxy.clone(), state.clone()).await;

        let state = state.lock().unwrap();
        assert!(state.tree.is_none());
        assert!(!state.is_building);
        assert!(proxy.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_result_of_current_generation_is_applied() {
        let dir = library();
        let state = building_state(1, true);
        let proxy = RecordingProxy::default();

        build_tree_task(dir.path().to_path_buf(), 1, proxy.clone(), state.clone()).await;

        let state = state.lock().unwrap();
        assert_eq!(state.tree.as_ref().map(|tree| tree.file_count()), Some(1));
        assert!(!state.is_building);
        let events = proxy.events.lock().unwrap();
        assert!(matches!(&events[..], [UserEvent::StateUpdate(ui)] if !ui.is_building));
    }
}
