use tracing::{debug, instrument};

use crate::{game::GameSnapshot, lobby::LobbyHandle, shared::AppError};

use super::messages::ClientAction;

/// Turns raw client input into calls on a lobby.
///
/// Input is cleaned here so the core only ever sees trimmed, non-empty text.
/// Rule violations are not errors at this level: the lobby ignores them and
/// the caller just gets no snapshot back.
pub struct ActionHandler {
    lobby: LobbyHandle,
}

impl ActionHandler {
    pub fn new(lobby: LobbyHandle) -> Self {
        Self { lobby }
    }

    pub fn lobby(&self) -> &LobbyHandle {
        &self.lobby
    }

    /// Parse one JSON action. Returns a snapshot only for `get_state`.
    pub async fn handle_text(&self, text: &str) -> Result<Option<GameSnapshot>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let action: ClientAction = serde_json::from_str(text)?;
        self.handle_action(action).await
    }

    #[instrument(skip_all, fields(action = action.action_type()))]
    pub async fn handle_action(
        &self,
        action: ClientAction,
    ) -> Result<Option<GameSnapshot>, AppError> {
        // Game errors are already logged by the lobby
        let _ = match action {
            ClientAction::CreateLobby { player_name } => match non_empty(&player_name) {
                Some(name) => self.lobby.create_lobby(name).await,
                None => return Ok(None),
            },
            ClientAction::JoinLobby {
                lobby_id,
                player_name,
            } => match (non_empty(&lobby_id), non_empty(&player_name)) {
                (Some(lobby_id), Some(name)) => {
                    self.lobby
                        .join_lobby(&lobby_id.to_uppercase(), name)
                        .await
                }
                _ => return Ok(None),
            },
            ClientAction::AddBot => self.lobby.add_bot_player().await,
            ClientAction::StartGame => self.lobby.start_game().await,
            ClientAction::SendGuess { guess } => match non_empty(&guess) {
                Some(guess) => self.lobby.send_guess(guess).await,
                None => return Ok(None),
            },
            ClientAction::NewRound => self.lobby.start_new_round().await,
            ClientAction::GetState => return Ok(Some(self.lobby.snapshot().await)),
        };

        Ok(None)
    }
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        debug!("Dropping empty input");
        None
    } else {
        Some(trimmed)
    }
}
