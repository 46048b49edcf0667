use crate::event::{EventHandler, SessionEvent};

/// Fans session signals out to subscribers.
///
/// Owned by the session and only touched from its `&mut self` handlers, so
/// each emit runs to completion before the next input is processed.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventHandler>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventBus({} subscribers)", self.subscribers.len())
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.subscribers.push(handler);
    }

    /// Deliver `event` to every subscriber in subscription order
    pub fn emit(&mut self, event: SessionEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_see_events_in_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for id in 0..2 {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |event: &SessionEvent| {
                seen.borrow_mut().push((id, event.clone()));
            }));
        }
        bus.emit(SessionEvent::StateChanged);

        assert_eq!(
            *seen.borrow(),
            vec![
                (0, SessionEvent::StateChanged),
                (1, SessionEvent::StateChanged)
            ]
        );
    }
}
