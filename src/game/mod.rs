// Public API
pub use core::{Followup, GameError, GameSession, Transition};
pub use models::{
    ChatMessage, GameSnapshot, Player, PlayerId, RoundPhase, SYSTEM_SENDER_ID, SYSTEM_SENDER_NAME,
};
pub use scoring::{is_correct_guess, points_for_hint};

// Internal modules
mod core;
mod models;
mod scoring;
