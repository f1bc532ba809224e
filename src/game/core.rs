use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::{
    bot::{pending_bots, pick_bot_name, BotGuess, BotStrategy, BotTurn, HintWeightedStrategy},
    config::GameConfig,
    event::LobbyEvent,
    word_bank::{WordBank, WordEntry},
};

use super::{
    models::{ChatMessage, GameSnapshot, Player, PlayerId, RoundPhase},
    scoring::{is_correct_guess, points_for_hint},
};

/// Why an action was ignored. The session is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("No lobby has been created or joined")]
    NoLobby,
    #[error("Only the host can do that")]
    NotHost,
    #[error("Action not allowed while {actual}")]
    WrongPhase { actual: RoundPhase },
    #[error("Need at least {required} players, have {count}")]
    NotEnoughPlayers { count: usize, required: usize },
    #[error("Lobby is full")]
    LobbyFull,
    #[error("No bot names left")]
    BotNamesExhausted,
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("Player already guessed this round: {0}")]
    AlreadyGuessed(PlayerId),
    #[error("Scheduled for round {scheduled}, current round is {current}")]
    StaleRound { scheduled: u64, current: u64 },
}

/// Work the runtime has to schedule after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Followup {
    /// Start the countdown and the hint reveal for this round
    StartRoundTimers { round: u64 },
    StopRoundTimers,
    EndRoundAfter { round: u64, delay: Duration },
    /// Let the bots react to a human solving the word
    SimulateBots { round: u64, hint_count: u32 },
}

/// Result of one atomic transition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub events: Vec<LobbyEvent>,
    pub followups: Vec<Followup>,
}

impl Transition {
    fn push_event(&mut self, event: LobbyEvent) {
        self.events.push(event);
    }

    fn push_followup(&mut self, followup: Followup) {
        self.followups.push(followup);
    }
}

/// The authoritative state of one lobby as seen by the local player.
///
/// Every method is a single read-modify-write: it either applies fully and
/// returns the resulting `Transition`, or returns a `GameError` and changes
/// nothing. Timers never touch fields directly; they call back into
/// `tick_timer`, `reveal_next_hint`, `end_round` and `apply_bot_turn` with
/// the round number they were scheduled for.
pub struct GameSession {
    config: GameConfig,
    word_bank: WordBank,
    strategy: Box<dyn BotStrategy>,
    rng: StdRng,
    lobby_id: Option<String>,
    local_player: Option<PlayerId>,
    players: Vec<Player>,
    phase: RoundPhase,
    current_word: Option<WordEntry>,
    hint_count: u32,
    chat: Vec<ChatMessage>,
    time_remaining: u32,
    guessed: HashSet<PlayerId>,
    round: u64,
}

impl GameSession {
    pub fn new(config: GameConfig, word_bank: WordBank, rng: StdRng) -> Self {
        let strategy = HintWeightedStrategy::new(config.bot_base_chance, config.bot_chance_per_hint);
        Self {
            time_remaining: config.round_seconds,
            config,
            word_bank,
            strategy: Box::new(strategy),
            rng,
            lobby_id: None,
            local_player: None,
            players: Vec::new(),
            phase: RoundPhase::Waiting,
            current_word: None,
            hint_count: 0,
            chat: Vec::new(),
            guessed: HashSet::new(),
            round: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn BotStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn local_player_id(&self) -> Option<PlayerId> {
        self.local_player
    }

    pub fn has_guessed(&self, player_id: PlayerId) -> bool {
        self.guessed.contains(&player_id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            lobby_id: self.lobby_id.clone(),
            player_id: self.local_player,
            players: self.players.clone(),
            phase: self.phase,
            current_hint: self
                .current_word
                .as_ref()
                .and_then(|w| w.hint(self.hint_count))
                .map(str::to_string),
            hint_count: self.hint_count,
            chat_messages: self.chat.clone(),
            time_remaining: self.time_remaining,
        }
    }

    /// Open a fresh lobby with `player_name` as its only member and host
    pub fn create_lobby(&mut self, player_name: &str) -> Transition {
        let mut transition = Transition::default();
        if self.phase == RoundPhase::Playing {
            transition.push_followup(Followup::StopRoundTimers);
        }

        let lobby_id = self.generate_lobby_id();
        let host = Player::human(player_name.to_string(), true);
        let host_id = host.id;

        self.reset_lobby(lobby_id.clone(), vec![host]);
        self.local_player = Some(host_id);

        transition.push_event(LobbyEvent::LobbyCreated {
            lobby_id,
            player_id: host_id,
            players: self.players.clone(),
        });
        transition
    }

    /// Enter `lobby_id` as a regular player.
    ///
    /// Joining the lobby already held here appends to its roster, but only
    /// while it is `waiting` and has a free seat. A finished round is not
    /// reopened for newcomers. Any other id starts a roster of one for that
    /// lobby.
    pub fn join_lobby(&mut self, lobby_id: &str, player_name: &str) -> Result<Transition, GameError> {
        let player = Player::human(player_name.to_string(), false);
        let player_id = player.id;
        let mut transition = Transition::default();

        if self.lobby_id.as_deref() == Some(lobby_id) {
            self.require_phase(RoundPhase::Waiting)?;
            self.require_capacity()?;
            self.players.push(player);
        } else {
            if self.phase == RoundPhase::Playing {
                transition.push_followup(Followup::StopRoundTimers);
            }
            self.reset_lobby(lobby_id.to_string(), vec![player]);
        }
        self.local_player = Some(player_id);

        transition.push_event(LobbyEvent::PlayerJoined {
            lobby_id: lobby_id.to_string(),
            player_id,
            players: self.players.clone(),
        });
        Ok(transition)
    }

    pub fn add_bot_player(&mut self) -> Result<Transition, GameError> {
        self.require_host()?;
        self.require_phase(RoundPhase::Waiting)?;
        self.require_capacity()?;

        let name = pick_bot_name(&self.players, &mut self.rng).ok_or(GameError::BotNamesExhausted)?;
        let bot = Player::bot(name.to_string());
        self.players.push(bot.clone());

        let mut transition = Transition::default();
        transition.push_event(LobbyEvent::BotAdded {
            player: bot,
            players: self.players.clone(),
        });
        Ok(transition)
    }

    pub fn start_game(&mut self) -> Result<Transition, GameError> {
        self.require_host()?;
        self.require_phase(RoundPhase::Waiting)?;
        if self.players.len() < self.config.min_players_to_start {
            return Err(GameError::NotEnoughPlayers {
                count: self.players.len(),
                required: self.config.min_players_to_start,
            });
        }

        Ok(self.begin_round())
    }

    pub fn start_new_round(&mut self) -> Result<Transition, GameError> {
        self.require_host()?;
        self.require_phase(RoundPhase::Finished)?;

        Ok(self.begin_round())
    }

    /// Guess on behalf of the local player
    pub fn send_guess(&mut self, guess: &str) -> Result<Transition, GameError> {
        let player_id = self.local_player.ok_or(GameError::NoLobby)?;
        self.submit_guess(player_id, guess)
    }

    pub fn submit_guess(&mut self, player_id: PlayerId, guess: &str) -> Result<Transition, GameError> {
        self.require_phase(RoundPhase::Playing)?;
        let player = self
            .player(player_id)
            .cloned()
            .ok_or(GameError::UnknownPlayer(player_id))?;
        if self.guessed.contains(&player_id) {
            return Err(GameError::AlreadyGuessed(player_id));
        }

        let is_correct = self
            .current_word
            .as_ref()
            .is_some_and(|w| is_correct_guess(guess, &w.word));

        let mut transition = Transition::default();
        self.post_chat(
            ChatMessage::from_player(&player, guess.to_string(), is_correct),
            &mut transition,
        );

        if is_correct {
            self.credit(player_id, self.hint_count, &mut transition);

            if self.all_guessed() {
                transition.push_followup(Followup::EndRoundAfter {
                    round: self.round,
                    delay: self.config.round_end_delay,
                });
            } else if !player.is_bot {
                transition.push_followup(Followup::SimulateBots {
                    round: self.round,
                    hint_count: self.hint_count,
                });
            }
        }

        Ok(transition)
    }

    /// How long the bots wait before reacting to a solve
    pub fn bot_reaction_delay(&mut self) -> Duration {
        self.config.bot_reaction_base + jitter(&mut self.rng, self.config.bot_reaction_jitter)
    }

    /// Plan one turn for every bot still missing the word, staggered by roster order
    pub fn plan_bot_turns(&mut self, round: u64, hint_count: u32) -> Result<Vec<BotTurn>, GameError> {
        self.require_current(round)?;
        let Some(word) = self.current_word.as_ref().map(|w| w.word.clone()) else {
            return Ok(Vec::new());
        };

        let guessed = &self.guessed;
        let bots: Vec<PlayerId> = pending_bots(&self.players, |p| guessed.contains(&p.id))
            .map(|p| p.id)
            .collect();

        debug!(
            round,
            hint_count,
            bots = bots.len(),
            strategy = self.strategy.strategy_name(),
            "Planning bot turns"
        );

        let turns = bots
            .into_iter()
            .enumerate()
            .map(|(index, bot_id)| {
                let delay = self.config.bot_stagger * index as u32
                    + jitter(&mut self.rng, self.config.bot_jitter);
                let guess = self.strategy.decide_guess(&word, hint_count, &mut self.rng);
                BotTurn {
                    round,
                    bot_id,
                    delay,
                    guess,
                    hint_count,
                }
            })
            .collect();

        Ok(turns)
    }

    pub fn apply_bot_turn(&mut self, turn: &BotTurn) -> Result<Transition, GameError> {
        self.require_current(turn.round)?;
        let bot = self
            .player(turn.bot_id)
            .filter(|p| p.is_bot)
            .cloned()
            .ok_or(GameError::UnknownPlayer(turn.bot_id))?;
        if self.guessed.contains(&bot.id) {
            return Err(GameError::AlreadyGuessed(bot.id));
        }

        let mut transition = Transition::default();
        match &turn.guess {
            BotGuess::Correct => {
                let word = self
                    .current_word
                    .as_ref()
                    .map(|w| w.word.clone())
                    .unwrap_or_default();
                self.post_chat(ChatMessage::from_player(&bot, word, true), &mut transition);
                self.credit(bot.id, turn.hint_count, &mut transition);

                if self.all_guessed() {
                    transition.push_followup(Followup::EndRoundAfter {
                        round: self.round,
                        delay: self.config.bot_round_end_delay,
                    });
                }
            }
            BotGuess::Wrong(decoy) => {
                self.post_chat(
                    ChatMessage::from_player(&bot, decoy.clone(), false),
                    &mut transition,
                );
            }
            BotGuess::Pass => {}
        }

        Ok(transition)
    }

    /// One countdown step; ends the round when the clock hits zero
    pub fn tick_timer(&mut self, round: u64) -> Result<Transition, GameError> {
        self.require_current(round)?;

        self.time_remaining = self.time_remaining.saturating_sub(1);
        let mut transition = Transition::default();
        transition.push_event(LobbyEvent::TimerTicked {
            time_remaining: self.time_remaining,
        });

        if self.time_remaining == 0 {
            self.finish_round(&mut transition);
        }
        Ok(transition)
    }

    /// Expose the next hint; a no-op once all are out
    pub fn reveal_next_hint(&mut self, round: u64) -> Result<Transition, GameError> {
        self.require_current(round)?;

        let mut transition = Transition::default();
        let Some(word) = self.current_word.as_ref() else {
            return Ok(transition);
        };
        if self.hint_count >= word.hint_count() {
            return Ok(transition);
        }

        self.hint_count += 1;
        if let Some(hint) = word.hint(self.hint_count) {
            transition.push_event(LobbyEvent::HintRevealed {
                hint: hint.to_string(),
                hint_number: self.hint_count,
            });
        }
        Ok(transition)
    }

    pub fn end_round(&mut self, round: u64) -> Result<Transition, GameError> {
        self.require_current(round)?;

        let mut transition = Transition::default();
        self.finish_round(&mut transition);
        Ok(transition)
    }

    fn begin_round(&mut self) -> Transition {
        let entry = self.word_bank.choose(&mut self.rng).clone();

        self.round += 1;
        self.phase = RoundPhase::Playing;
        self.time_remaining = self.config.round_seconds;
        self.chat.clear();
        self.guessed.clear();
        self.hint_count = 1;
        let hint = entry.hint(1).unwrap_or_default().to_string();
        self.current_word = Some(entry);

        let mut transition = Transition::default();
        transition.push_event(LobbyEvent::RoundStarted {
            round: self.round,
            hint,
            hint_number: self.hint_count,
            time_remaining: self.time_remaining,
        });
        transition.push_followup(Followup::StartRoundTimers { round: self.round });
        transition
    }

    fn finish_round(&mut self, transition: &mut Transition) {
        self.phase = RoundPhase::Finished;
        transition.push_followup(Followup::StopRoundTimers);

        let word = self
            .current_word
            .as_ref()
            .map(|w| w.word.clone())
            .unwrap_or_default();
        self.post_chat(
            ChatMessage::system(format!("Das richtige Wort war: {}", word)),
            transition,
        );
        transition.push_event(LobbyEvent::RoundEnded {
            word,
            scores: self.players.clone(),
        });
    }

    fn credit(&mut self, player_id: PlayerId, hint_count: u32, transition: &mut Transition) {
        let points = points_for_hint(hint_count);
        self.guessed.insert(player_id);

        if let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) {
            player.score += points;
            transition.push_event(LobbyEvent::CorrectGuess {
                player_id,
                points,
                total_score: player.score,
            });
        }
    }

    fn post_chat(&mut self, message: ChatMessage, transition: &mut Transition) {
        self.chat.push(message.clone());
        transition.push_event(LobbyEvent::ChatMessage { message });
    }

    fn reset_lobby(&mut self, lobby_id: String, players: Vec<Player>) {
        self.lobby_id = Some(lobby_id);
        self.players = players;
        self.phase = RoundPhase::Waiting;
        self.current_word = None;
        self.hint_count = 0;
        self.chat.clear();
        self.guessed.clear();
        self.time_remaining = self.config.round_seconds;
    }

    fn generate_lobby_id(&mut self) -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        (0..8)
            .map(|_| CHARSET[self.rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }

    fn all_guessed(&self) -> bool {
        self.guessed.len() >= self.players.len()
    }

    fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn require_host(&self) -> Result<(), GameError> {
        let local = self.local_player.ok_or(GameError::NoLobby)?;
        match self.player(local) {
            Some(player) if player.is_host => Ok(()),
            _ => Err(GameError::NotHost),
        }
    }

    fn require_phase(&self, expected: RoundPhase) -> Result<(), GameError> {
        if self.lobby_id.is_none() {
            return Err(GameError::NoLobby);
        }
        if self.phase != expected {
            return Err(GameError::WrongPhase { actual: self.phase });
        }
        Ok(())
    }

    fn require_capacity(&self) -> Result<(), GameError> {
        if self.players.len() >= self.config.max_players {
            return Err(GameError::LobbyFull);
        }
        Ok(())
    }

    fn require_current(&self, round: u64) -> Result<(), GameError> {
        self.require_phase(RoundPhase::Playing)?;
        if round != self.round {
            return Err(GameError::StaleRound {
                scheduled: round,
                current: self.round,
            });
        }
        Ok(())
    }
}

fn jitter(rng: &mut StdRng, max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    Duration::from_millis(rng.random_range(0..=max_ms))
}
