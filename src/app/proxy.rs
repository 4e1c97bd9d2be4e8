//! Defines an abstraction over the event sending mechanism.

use super::events::UserEvent;
use tao::event_loop::EventLoopProxy;

/// Sends `UserEvent`s towards the UI thread.
///
/// Sending is fire-and-forget: commands and the build task never need to know
/// whether the event loop is still alive. Tests substitute a channel.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

impl EventProxy for EventLoopProxy<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // Fails only once the event loop has exited.
        if let Err(e) = EventLoopProxy::send_event(self, event) {
            tracing::warn!("Failed to send event to event loop: {}", e);
        }
    }
}
