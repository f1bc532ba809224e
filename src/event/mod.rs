// Event plumbing between the lobby runtime and whoever presents it.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::LobbyEvent;
pub use subscription::{EventSubscriber, SubscriberError, Subscription};

// Internal modules
mod bus;
mod events;
mod subscription;
