use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::broadcast;

use wordhint::{GameConfig, LobbyEvent, LobbyHandle, WordBank, WordEntry};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub lobby: LobbyHandle,
    pub events: broadcast::Receiver<LobbyEvent>,
}

impl TestSetup {
    pub async fn guess(&self, text: &str) {
        let _ = self.lobby.send_guess(text).await;
    }

    pub async fn start(&self) {
        self.lobby.start_game().await.unwrap();
    }
}

pub struct TestSetupBuilder {
    config: GameConfig,
    host: String,
    bots: usize,
    seed: u64,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            host: "Ann".to_string(),
            bots: 0,
            seed: 7,
        }
    }

    pub fn with_bots(mut self, bots: usize) -> Self {
        self.bots = bots;
        self
    }

    /// Fixed bot accuracy, independent of the hint count
    pub fn with_bot_chance(mut self, chance: f64) -> Self {
        self.config.bot_base_chance = chance;
        self.config.bot_chance_per_hint = 0.0;
        self
    }

    pub fn with_round_seconds(mut self, seconds: u32) -> Self {
        self.config.round_seconds = seconds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lobby hosted by Ann with the requested bots, still waiting
    pub async fn build(self) -> TestSetup {
        let lobby = LobbyHandle::new(self.config, elefant_bank(), StdRng::seed_from_u64(self.seed));
        let events = lobby.subscribe();

        lobby.create_lobby(&self.host).await.unwrap();
        for _ in 0..self.bots {
            lobby.add_bot_player().await.unwrap();
        }

        TestSetup { lobby, events }
    }
}

/// A bank with a single word so every round is predictable
pub fn elefant_bank() -> WordBank {
    WordBank::new(vec![WordEntry::new(
        "ELEFANT",
        [
            "Das ist ein großes Säugetier",
            "Es hat einen langen Rüssel",
            "Man findet es in Afrika und Asien",
            "Es vergisst nie etwas",
        ],
    )])
    .unwrap()
}

/// Let virtual time run; only meaningful in `start_paused` tests
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
}
