pub mod basic_strategy;
pub mod manager;
pub mod types;

pub use basic_strategy::HintWeightedStrategy;
pub use manager::{pending_bots, pick_bot_name, BOT_NAMES, MAX_LOBBY_PLAYERS};
pub use types::{BotGuess, BotStrategy, BotTurn};
