// crates/tracker/src/events.rs
//! Typed in-process event bus.
//!
//! Replaces the original dashboard's window CustomEvents with a broadcast
//! channel carrying `AppEvent`. Emission is fire-and-forget: if nobody is
//! listening the event is dropped, same as an unheard DOM event.

use tokio::sync::broadcast;

use aibys_console_types::AppEvent;

/// Capacity of the event channel. Slow subscribers that fall further behind
/// than this see `RecvError::Lagged` and skip ahead.
const EVENT_CAPACITY: usize = 256;

/// Cheaply cloneable handle to the application event channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn emit(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aibys_console_types::ToastKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_emit_reaches_all_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(AppEvent::BlogsRefresh);

        assert_eq!(rx1.recv().await.unwrap(), AppEvent::BlogsRefresh);
        assert_eq!(rx2.recv().await.unwrap(), AppEvent::BlogsRefresh);
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.emit(AppEvent::success("nobody listening"));
    }

    #[tokio::test]
    async fn test_clone_shares_channel() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        clone.emit(AppEvent::error("Gagal", None));

        match rx.recv().await.unwrap() {
            AppEvent::ShowToast { kind, message, .. } => {
                assert_eq!(kind, ToastKind::Error);
                assert_eq!(message, "Gagal");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
