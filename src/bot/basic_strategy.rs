use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::game::is_correct_guess;
use crate::word_bank::DECOY_WORDS;

use super::types::{BotGuess, BotStrategy};

/// Bot that gets luckier the more hints are out
pub struct HintWeightedStrategy {
    base_chance: f64,
    chance_per_hint: f64,
    decoys: Vec<String>,
}

impl HintWeightedStrategy {
    pub fn new(base_chance: f64, chance_per_hint: f64) -> Self {
        Self::with_decoys(
            base_chance,
            chance_per_hint,
            DECOY_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }

    pub fn with_decoys(base_chance: f64, chance_per_hint: f64, decoys: Vec<String>) -> Self {
        Self {
            base_chance,
            chance_per_hint,
            decoys,
        }
    }

    /// Probability of a correct answer; values above 1.0 simply always hit
    pub fn chance(&self, hint_count: u32) -> f64 {
        self.base_chance + self.chance_per_hint * hint_count as f64
    }
}

impl BotStrategy for HintWeightedStrategy {
    fn decide_guess(&self, word: &str, hint_count: u32, rng: &mut StdRng) -> BotGuess {
        let chance = self.chance(hint_count);
        let roll: f64 = rng.random();

        if roll < chance {
            debug!(hint_count, chance, "Bot hits the word");
            return BotGuess::Correct;
        }

        let candidates: Vec<&String> = self
            .decoys
            .iter()
            .filter(|decoy| !is_correct_guess(decoy, word))
            .collect();

        match candidates.choose(rng) {
            Some(decoy) => BotGuess::Wrong((*decoy).clone()),
            None => BotGuess::Pass,
        }
    }

    fn strategy_name(&self) -> &'static str {
        "HintWeightedStrategy"
    }
}
