use tokio::sync::broadcast;
use tracing::debug;

use super::events::LobbyEvent;

/// Fan-out of lobby events to every interested subscriber
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LobbyEvent>,
}

impl EventBus {
    /// Creates a new event bus; slow subscribers lag after `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn emit(&self, event: LobbyEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    event_type = event_type,
                    receivers = receiver_count,
                    "Lobby event emitted"
                );
            }
            Err(_) => {
                debug!(event_type = event_type, "Lobby event emitted with no receivers");
            }
        }
    }

    pub fn emit_all(&self, events: impl IntoIterator<Item = LobbyEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LobbyEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_events_in_order() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit_all([
            LobbyEvent::TimerTicked { time_remaining: 2 },
            LobbyEvent::TimerTicked { time_remaining: 1 },
        ]);

        assert_eq!(
            rx.recv().await.unwrap(),
            LobbyEvent::TimerTicked { time_remaining: 2 }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            LobbyEvent::TimerTicked { time_remaining: 1 }
        );
    }

    #[test]
    fn test_emit_without_receivers_is_harmless() {
        let bus = EventBus::default();
        bus.emit(LobbyEvent::TimerTicked { time_remaining: 0 });
    }
}
