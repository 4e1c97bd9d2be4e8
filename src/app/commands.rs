//! Contains all the command handlers that are callable from the frontend via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the `core`
//! logic, and for sending `UserEvent`s back to the UI.

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::file_dialog::DialogService;
use super::helpers::{notify, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks::start_build_on_path;
use crate::core::{CsvExporter, NodeId, PathClassifier};

pub const EXPORT_FAILED_MESSAGE: &str = "Failed to generate the CSV file.";

#[derive(Deserialize, Debug)]
struct NodePayload {
    id: NodeId,
}

#[derive(Deserialize, Debug)]
struct PatternPayload {
    pattern: String,
}

/// Handles the initial request for state from the frontend when it loads.
///
/// Re-opens the last directory when `auto_load_last_directory` is set and
/// nothing has been picked yet.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let auto_load = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        notify(&state_guard, &proxy);

        let idle = state_guard.current_path.is_empty() && !state_guard.is_building;
        if state_guard.config.auto_load_last_directory && idle {
            state_guard
                .config
                .last_directory
                .clone()
                .filter(|dir| dir.is_dir())
        } else {
            None
        }
    };

    if let Some(dir) = auto_load {
        tracing::info!("Auto-loading last directory {:?}", dir);
        start_build_on_path(dir, proxy, state);
    }
}

/// Opens a folder dialog and builds the tree of the chosen directory.
pub fn select_directory<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Some(path) = dialog.pick_directory() {
        start_build_on_path(path, proxy, state);
    } else {
        tracing::info!("User cancelled directory selection.");
    }
}

/// Rebuilds the tree of the current directory. All flags start fresh.
pub fn rescan_directory<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let current_path = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
        .current_path
        .clone();

    if !current_path.is_empty() {
        start_build_on_path(PathBuf::from(current_path), proxy, state);
    }
}

/// Clears the currently loaded directory and resets the application state.
pub fn clear_directory<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.reset_directory_state();
        s.config.last_directory = None;
        s.save_config();
    });
}

/// Cancels the build in progress. A result that still arrives is discarded.
pub fn cancel_build<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        tracing::info!("IPC 'cancelBuild' received.");
        s.cancel_current_build();
        if s.tree.is_none() {
            s.current_path.clear();
        }
    });
}

/// Flips the `enabled` flag of a file node.
pub fn toggle_enabled<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    toggle_node(payload, proxy, state, "enabled", |tree, id| {
        tree.toggle_enabled(id)
    });
}

/// Flips the `expanded` flag of a directory node.
pub fn toggle_expanded<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    toggle_node(payload, proxy, state, "expanded", |tree, id| {
        tree.toggle_expanded(id)
    });
}

fn toggle_node<P, F>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
    flag: &str,
    toggle: F,
) where
    P: EventProxy,
    F: FnOnce(&mut crate::core::Tree, NodeId) -> Result<bool, crate::core::CoreError>,
{
    let id = match serde_json::from_value::<NodePayload>(payload.clone()) {
        Ok(NodePayload { id }) => id,
        Err(e) => {
            tracing::warn!("Invalid node payload {:?}: {}", payload, e);
            return;
        }
    };

    with_state_and_notify(&state, &proxy, |s| {
        let Some(tree) = s.tree.as_mut() else {
            tracing::warn!("Toggle of {} {} ignored: no tree is loaded", flag, id);
            return;
        };
        match toggle(tree, id) {
            Ok(value) => tracing::debug!("Node {} {} = {}", id, flag, value),
            Err(e) => tracing::warn!("Toggle of {} rejected: {}", flag, e),
        }
    });
}

/// Stores the category pattern used by the next export.
///
/// The UI owns the text field, so no redraw is sent.
pub fn update_pattern(payload: serde_json::Value, state: Arc<Mutex<AppState>>) {
    match serde_json::from_value::<PatternPayload>(payload.clone()) {
        Ok(PatternPayload { pattern }) => {
            state
                .lock()
                .expect("Mutex was poisoned. This should not happen.")
                .pattern = pattern;
        }
        Err(e) => tracing::warn!("Invalid pattern payload {:?}: {}", payload, e),
    }
}

/// Generates the CSV for the enabled files and saves it where the user chooses.
///
/// Any generation failure is logged in detail and reported to the user as a
/// single generic error.
pub fn export_csv<P, D, C>(dialog: &D, classifier: &C, proxy: P, state: Arc<Mutex<AppState>>)
where
    P: EventProxy,
    D: DialogService + ?Sized,
    C: PathClassifier + ?Sized,
{
    let (generated, config) = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        let generated =
            CsvExporter::generate(state_guard.tree.as_ref(), &state_guard.pattern, classifier);
        (generated, state_guard.config.clone())
    };

    let export = match generated {
        Ok(export) => export,
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            proxy.send_event(UserEvent::ShowError(EXPORT_FAILED_MESSAGE.to_string()));
            return;
        }
    };

    let Some(path) = dialog.save_csv_path(&config, &export.file_name) else {
        tracing::info!("User cancelled CSV export.");
        return;
    };

    match std::fs::write(&path, &export.content) {
        Ok(()) => {
            tracing::info!("Wrote {} rows to {:?}", export.row_count, path);
            {
                let mut state_guard = state
                    .lock()
                    .expect("Mutex was poisoned. This should not happen.");
                state_guard.config.output_directory = path.parent().map(|p| p.to_path_buf());
                state_guard.save_config();
            }
            proxy.send_event(UserEvent::ExportComplete(
                true,
                format!("Saved {} rows to {}", export.row_count, path.display()),
            ));
        }
        Err(e) => {
            tracing::error!("Failed to write CSV to {:?}: {}", path, e);
            proxy.send_event(UserEvent::ExportComplete(
                false,
                format!("Could not save {}", path.display()),
            ));
        }
    }
}
