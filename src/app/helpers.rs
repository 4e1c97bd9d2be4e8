//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;

/// A helper function that locks the `AppState`, performs a mutation,
/// and then automatically sends a `StateUpdate` event to the UI.
pub fn with_state_and_notify<F, R, P: EventProxy>(
    state: &Arc<Mutex<AppState>>,
    proxy: &P,
    update_fn: F,
) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    let result = update_fn(&mut state_guard);
    notify(&state_guard, proxy);
    result
}

/// Sends the current state to the UI.
pub fn notify<P: EventProxy>(state: &AppState, proxy: &P) {
    let ui_state = generate_ui_state(state);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}
