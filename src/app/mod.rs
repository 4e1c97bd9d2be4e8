//! The application layer: state, IPC command dispatch and UI events.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use crate::core::CategoryClassifier;
use events::{IpcMessage, UserEvent};
use file_dialog::DialogService;
use proxy::EventProxy;
use state::AppState;

/// Parses an IPC message from the WebView and dispatches it to its command.
pub fn handle_ipc_message<P: EventProxy, D: DialogService + ?Sized>(
    message: String,
    dialog: Arc<D>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let msg = match serde_json::from_str::<IpcMessage>(&message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message {:?}: {}", message, e);
            return;
        }
    };

    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "selectDirectory" => commands::select_directory(&*dialog, proxy, state),
        "rescanDirectory" => commands::rescan_directory(proxy, state),
        "clearDirectory" => commands::clear_directory(proxy, state),
        "cancelBuild" => commands::cancel_build(proxy, state),
        "toggleEnabled" => commands::toggle_enabled(msg.payload, proxy, state),
        "toggleExpanded" => commands::toggle_expanded(msg.payload, proxy, state),
        "updatePattern" => commands::update_pattern(msg.payload, state),
        "exportCsv" => match CategoryClassifier::new() {
            Ok(classifier) => commands::export_csv(&*dialog, &classifier, proxy, state),
            Err(e) => {
                tracing::error!("Failed to create classifier: {}", e);
                proxy.send_event(UserEvent::ShowError(
                    commands::EXPORT_FAILED_MESSAGE.to_string(),
                ));
            }
        },
        other => tracing::warn!("Unknown IPC command: {}", other),
    }
}

/// Translates a `UserEvent` into a call to the matching `window.*` function.
pub fn handle_user_event(event: UserEvent, webview: &wry::WebView) {
    let script = match event {
        UserEvent::StateUpdate(ui_state) => {
            serde_json::to_string(&ui_state).map(|json| format!("window.render({})", json))
        }
        UserEvent::ShowError(message) => {
            serde_json::to_string(&message).map(|json| format!("window.showError({})", json))
        }
        UserEvent::ExportComplete(success, message) => serde_json::to_string(&message)
            .map(|json| format!("window.exportComplete({}, {})", success, json)),
        UserEvent::DragStateChanged(is_dragging) => {
            Ok(format!("window.setDragState({})", is_dragging))
        }
    };

    match script {
        Ok(script) => {
            if let Err(e) = webview.evaluate_script(&script) {
                tracing::warn!("Failed to evaluate script in WebView: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize UI event: {}", e),
    }
}
