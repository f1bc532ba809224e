use tokio::sync::broadcast::{self, error::TryRecvError};

use wordhint::{GameSnapshot, LobbyEvent, LobbyHandle, RoundPhase};

/// Builder-style checks against a lobby snapshot
pub struct LobbyAssertion {
    snapshot: GameSnapshot,
}

impl LobbyAssertion {
    pub async fn of(lobby: &LobbyHandle) -> Self {
        Self {
            snapshot: lobby.snapshot().await,
        }
    }

    pub fn phase(self, expected: RoundPhase) -> Self {
        assert_eq!(self.snapshot.phase, expected, "unexpected phase");
        self
    }

    pub fn time_remaining(self, expected: u32) -> Self {
        assert_eq!(self.snapshot.time_remaining, expected, "unexpected clock");
        self
    }

    pub fn hint_count(self, expected: u32) -> Self {
        assert_eq!(self.snapshot.hint_count, expected, "unexpected hint count");
        self
    }

    pub fn score(self, name: &str, expected: u32) -> Self {
        let player = self
            .snapshot
            .player_by_name(name)
            .unwrap_or_else(|| panic!("no player named {}", name));
        assert_eq!(player.score, expected, "unexpected score for {}", name);
        self
    }

    pub fn bot_score(self, expected: u32) -> Self {
        let bot = self
            .snapshot
            .players
            .iter()
            .find(|p| p.is_bot)
            .expect("lobby has no bot");
        assert_eq!(bot.score, expected, "unexpected score for {}", bot.name);
        self
    }

    pub fn revealed_word(self, word: &str) -> Self {
        let last = self.snapshot.chat_messages.last().expect("chat is empty");
        assert!(last.is_system());
        assert_eq!(last.message, format!("Das richtige Wort war: {}", word));
        self
    }

    pub fn chat_len(self, expected: usize) -> Self {
        assert_eq!(self.snapshot.chat_messages.len(), expected, "unexpected chat length");
        self
    }

    pub fn snapshot(self) -> GameSnapshot {
        self.snapshot
    }
}

/// Everything published so far, without waiting
pub fn drain_events(receiver: &mut broadcast::Receiver<LobbyEvent>) -> Vec<LobbyEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    events
}
