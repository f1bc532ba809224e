use rand::rngs::StdRng;
use std::time::Duration;

use crate::game::PlayerId;

/// What a bot says on its turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotGuess {
    /// Posts the real word
    Correct,
    /// Posts a wrong word
    Wrong(String),
    /// Stays silent
    Pass,
}

/// One scheduled bot answer, planned when the bots react to a solve
#[derive(Debug, Clone, PartialEq)]
pub struct BotTurn {
    pub round: u64,
    pub bot_id: PlayerId,
    pub delay: Duration,
    pub guess: BotGuess,
    /// Hints visible when the triggering guess landed; used for scoring
    pub hint_count: u32,
}

/// Trait for bot decision-making strategies
pub trait BotStrategy: Send + Sync {
    /// Decide what a bot answers for `word` with `hint_count` hints out
    fn decide_guess(&self, word: &str, hint_count: u32, rng: &mut StdRng) -> BotGuess;

    /// Get the name of this strategy
    fn strategy_name(&self) -> &'static str;
}
