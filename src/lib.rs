// Library crate for the word-hint party game
// This file exposes the public API for the binary and integration tests

pub mod bot;
pub mod config;
pub mod event;
pub mod game;
pub mod lobby;
pub mod protocol;
pub mod shared;
pub mod word_bank;

// Re-export commonly used types for easier access in tests
pub use config::GameConfig;
pub use event::{EventBus, EventSubscriber, LobbyEvent, Subscription};
pub use game::{GameError, GameSession, GameSnapshot, RoundPhase};
pub use lobby::LobbyHandle;
pub use protocol::{ActionHandler, ClientAction};
pub use shared::AppError;
pub use word_bank::{WordBank, WordEntry};
