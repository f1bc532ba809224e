use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

pub type PlayerId = Uuid;

/// Sender id used for messages the lobby itself posts
pub const SYSTEM_SENDER_ID: &str = "system";
pub const SYSTEM_SENDER_NAME: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoundPhase {
    /// Lobby assembling
    Waiting,
    Playing,
    /// Round over, scoreboard shown
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_host: bool,
    pub is_bot: bool,
}

impl Player {
    pub fn human(name: String, is_host: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            score: 0,
            is_host,
            is_bot: false,
        }
    }

    pub fn bot(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            score: 0,
            is_host: false,
            is_bot: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Player id as text, or `system`
    pub sender_id: String,
    pub sender_name: String,
    pub message: String,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_player(player: &Player, message: String, is_correct: bool) -> Self {
        Self {
            sender_id: player.id.to_string(),
            sender_name: player.name.clone(),
            message,
            is_correct,
            timestamp: Utc::now(),
        }
    }

    pub fn system(message: String) -> Self {
        Self {
            sender_id: SYSTEM_SENDER_ID.to_string(),
            sender_name: SYSTEM_SENDER_NAME.to_string(),
            message,
            is_correct: false,
            timestamp: Utc::now(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender_id == SYSTEM_SENDER_ID
    }
}

/// Everything a presentation layer is allowed to see about a lobby.
/// The active word is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub lobby_id: Option<String>,
    pub player_id: Option<PlayerId>,
    pub players: Vec<Player>,
    pub phase: RoundPhase,
    pub current_hint: Option<String>,
    pub hint_count: u32,
    pub chat_messages: Vec<ChatMessage>,
    pub time_remaining: u32,
}

impl GameSnapshot {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }
}
