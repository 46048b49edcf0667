mod bus;
mod events;

pub use bus::EventBus;
pub use events::{PointerHint, SessionEvent};

/// Receives signals emitted by the tool session
pub trait EventHandler {
    fn handle_event(&mut self, event: &SessionEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&SessionEvent),
{
    fn handle_event(&mut self, event: &SessionEvent) {
        (*self)(event)
    }
}
