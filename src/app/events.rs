//! Defines the event and message structures for communication between the backend and frontend.

use serde::Deserialize;

use super::view_model::UiState;

/// Events sent from the Rust backend to the WebView (UI thread).
///
/// Each variant corresponds to a specific JavaScript function (`window.*`) that will be called in the frontend.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the UI.
    StateUpdate(Box<UiState>),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// The result of a CSV export: success flag and a message for the user.
    ExportComplete(bool, String),
    /// Indicates that a file is being dragged over the window.
    DragStateChanged(bool),
}

/// A message received from the WebView via the IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
