use serde::{Deserialize, Serialize};

use crate::game::{ChatMessage, Player, PlayerId};

/// Events that can occur in a lobby
///
/// Events represent facts about things that have already happened.
/// A transport relays them to clients; the JSON-lines driver prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyEvent {
    /// A fresh lobby exists with the creator as host
    LobbyCreated {
        lobby_id: String,
        player_id: PlayerId,
        players: Vec<Player>,
    },

    /// The local player entered an existing lobby
    PlayerJoined {
        lobby_id: String,
        player_id: PlayerId,
        players: Vec<Player>,
    },

    BotAdded { player: Player, players: Vec<Player> },

    /// A round began: new word, clock reset, chat cleared
    RoundStarted {
        round: u64,
        hint: String,
        hint_number: u32,
        time_remaining: u32,
    },

    HintRevealed { hint: String, hint_number: u32 },

    TimerTicked { time_remaining: u32 },

    ChatMessage { message: ChatMessage },

    /// A player solved the word and was credited
    CorrectGuess {
        player_id: PlayerId,
        points: u32,
        total_score: u32,
    },

    /// The round is over and the word is disclosed
    RoundEnded { word: String, scores: Vec<Player> },
}

impl LobbyEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            LobbyEvent::LobbyCreated { .. } => "lobby_created",
            LobbyEvent::PlayerJoined { .. } => "player_joined",
            LobbyEvent::BotAdded { .. } => "bot_added",
            LobbyEvent::RoundStarted { .. } => "round_started",
            LobbyEvent::HintRevealed { .. } => "hint_revealed",
            LobbyEvent::TimerTicked { .. } => "timer_ticked",
            LobbyEvent::ChatMessage { .. } => "chat_message",
            LobbyEvent::CorrectGuess { .. } => "correct_guess",
            LobbyEvent::RoundEnded { .. } => "round_ended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tag_matches_event_type() {
        let event = LobbyEvent::HintRevealed {
            hint: "Es hat Saiten".to_string(),
            hint_number: 2,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.event_type());
        assert_eq!(json["hint_number"], 2);
    }

    #[test]
    fn test_timer_event_shape() {
        let json = serde_json::to_string(&LobbyEvent::TimerTicked { time_remaining: 42 }).unwrap();
        assert_eq!(json, r#"{"type":"timer_ticked","time_remaining":42}"#);
    }
}
