use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{bus::EventBus, events::LobbyEvent};

/// Errors that can occur when handling lobby events
#[derive(Debug, Error)]
pub enum SubscriberError {
    #[error("Output error: {0}")]
    Output(String),
}

/// Trait for components that react to lobby events
///
/// This keeps the lobby runtime unaware of who is listening:
/// a stdout printer, a socket writer or a test collector.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    async fn handle_event(&self, event: LobbyEvent) -> Result<(), SubscriberError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}

/// Routes events from a bus to one subscriber on a background task
pub struct Subscription {
    handler: Arc<dyn EventSubscriber>,
    event_bus: EventBus,
}

impl Subscription {
    pub fn new(handler: Arc<dyn EventSubscriber>, event_bus: EventBus) -> Self {
        Self { handler, event_bus }
    }

    /// Start the subscription. The task ends once every bus sender is gone.
    pub fn start(self) -> JoinHandle<()> {
        let Subscription { handler, event_bus } = self;
        let handler_name = handler.handler_name();
        let mut receiver = event_bus.subscribe();
        // the task must not keep the bus alive
        drop(event_bus);

        info!(handler = handler_name, "Starting event subscription");

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        if let Err(e) = handler.handle_event(event).await {
                            warn!(
                                handler = handler_name,
                                error = %e,
                                "Event handler failed"
                            );
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(handler = handler_name, skipped, "Subscriber lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            info!(handler = handler_name, "Event subscription ended");
        })
    }
}
