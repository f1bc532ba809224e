use serde::{Deserialize, Serialize};

/// Actions a player can take, one JSON object per message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientAction {
    CreateLobby { player_name: String },
    JoinLobby { lobby_id: String, player_name: String },
    AddBot,
    StartGame,
    SendGuess { guess: String },
    NewRound,
    /// Ask for a full snapshot of the lobby
    GetState,
}

impl ClientAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            ClientAction::CreateLobby { .. } => "create_lobby",
            ClientAction::JoinLobby { .. } => "join_lobby",
            ClientAction::AddBot => "add_bot",
            ClientAction::StartGame => "start_game",
            ClientAction::SendGuess { .. } => "send_guess",
            ClientAction::NewRound => "new_round",
            ClientAction::GetState => "get_state",
        }
    }
}
