use rand::rngs::StdRng;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, info, instrument};

use crate::{
    bot::BotTurn,
    config::GameConfig,
    event::{EventBus, LobbyEvent},
    game::{Followup, GameError, GameSession, GameSnapshot, Transition},
    word_bank::WordBank,
};

use super::timers::RoundTimers;

/// Cloneable handle to a running lobby.
///
/// All mutations go through the session lock, so a guess and a timer tick can
/// never interleave. Background tasks only hold a weak reference; once the
/// last handle is dropped they find nothing to upgrade and stop.
#[derive(Clone)]
pub struct LobbyHandle {
    inner: Arc<Inner>,
}

struct Inner {
    session: Mutex<GameSession>,
    timers: StdMutex<RoundTimers>,
    event_bus: EventBus,
}

impl LobbyHandle {
    pub fn new(config: GameConfig, word_bank: WordBank, rng: StdRng) -> Self {
        Self::from_session(GameSession::new(config, word_bank, rng), EventBus::default())
    }

    pub fn from_session(session: GameSession, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                timers: StdMutex::new(RoundTimers::new()),
                event_bus,
            }),
        }
    }

    pub fn event_bus(&self) -> EventBus {
        self.inner.event_bus.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LobbyEvent> {
        self.inner.event_bus.subscribe()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.inner.session.lock().await.snapshot()
    }

    #[instrument(skip(self))]
    pub async fn create_lobby(&self, player_name: &str) -> Result<(), GameError> {
        self.inner.timers().cancel_all();
        self.inner
            .run("create_lobby", |session| Ok(session.create_lobby(player_name)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn join_lobby(&self, lobby_id: &str, player_name: &str) -> Result<(), GameError> {
        self.inner
            .run("join_lobby", |session| session.join_lobby(lobby_id, player_name))
            .await
    }

    pub async fn add_bot_player(&self) -> Result<(), GameError> {
        self.inner
            .run("add_bot_player", GameSession::add_bot_player)
            .await
    }

    pub async fn start_game(&self) -> Result<(), GameError> {
        self.inner.run("start_game", GameSession::start_game).await
    }

    pub async fn start_new_round(&self) -> Result<(), GameError> {
        self.inner
            .run("start_new_round", GameSession::start_new_round)
            .await
    }

    pub async fn send_guess(&self, guess: &str) -> Result<(), GameError> {
        self.inner
            .run("send_guess", |session| session.send_guess(guess))
            .await
    }

    /// Stop every background task. The lobby state stays readable.
    pub fn shutdown(&self) {
        info!("Shutting down lobby timers");
        self.inner.timers().cancel_all();
    }

    /// Whether the countdown and hint tasks of a round are installed
    pub fn has_round_timers(&self) -> bool {
        self.inner.timers().has_round_timers()
    }
}

impl Inner {
    fn timers(&self) -> MutexGuard<'_, RoundTimers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one transition under the session lock, publish its events and
    /// schedule its followups before anyone else can touch the session.
    async fn run<F>(self: &Arc<Self>, action: &'static str, apply: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut GameSession) -> Result<Transition, GameError>,
    {
        let mut session = self.session.lock().await;

        match apply(&mut *session) {
            Ok(transition) => {
                for event in &transition.events {
                    log_event(event);
                }
                self.event_bus.emit_all(transition.events);
                for followup in transition.followups {
                    self.schedule(&mut *session, followup);
                }
                Ok(())
            }
            Err(e) => {
                debug!(action, error = %e, "Action ignored");
                Err(e)
            }
        }
    }

    fn schedule(self: &Arc<Self>, session: &mut GameSession, followup: Followup) {
        match followup {
            Followup::StartRoundTimers { round } => {
                let config = session.config();
                let countdown = self.spawn_periodic(round, config.tick_interval, move |session| {
                    session.tick_timer(round)
                });
                let hints = self.spawn_periodic(round, config.hint_interval, move |session| {
                    session.reveal_next_hint(round)
                });
                self.timers().start_round(countdown, hints);
            }
            Followup::StopRoundTimers => {
                self.timers().stop_round_timers();
            }
            Followup::EndRoundAfter { round, delay } => {
                debug!(round, delay_ms = delay.as_millis() as u64, "Round end scheduled");
                let handle = self.spawn_after(delay, move |inner| async move {
                    let _ = inner
                        .run("end_round", |session| session.end_round(round))
                        .await;
                });
                self.timers().track(handle);
            }
            Followup::SimulateBots { round, hint_count } => {
                let delay = session.bot_reaction_delay();
                debug!(round, hint_count, delay_ms = delay.as_millis() as u64, "Bots will react");
                let handle = self.spawn_after(delay, move |inner| async move {
                    inner.plan_bots(round, hint_count).await;
                });
                self.timers().track(handle);
            }
        }
    }

    async fn plan_bots(self: &Arc<Self>, round: u64, hint_count: u32) {
        let turns = match self.session.lock().await.plan_bot_turns(round, hint_count) {
            Ok(turns) => turns,
            Err(e) => {
                debug!(round, error = %e, "Bot reaction skipped");
                return;
            }
        };

        let mut timers = self.timers();
        for turn in turns {
            timers.track(self.spawn_bot_turn(turn));
        }
    }

    fn spawn_bot_turn(self: &Arc<Self>, turn: BotTurn) -> JoinHandle<()> {
        self.spawn_after(turn.delay, move |inner| async move {
            let _ = inner
                .run("bot_turn", |session| session.apply_bot_turn(&turn))
                .await;
        })
    }

    /// Run `apply` every `period`, first after one full period, until it is rejected
    fn spawn_periodic<F>(self: &Arc<Self>, round: u64, period: Duration, apply: F) -> JoinHandle<()>
    where
        F: Fn(&mut GameSession) -> Result<Transition, GameError> + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                if inner.run("timer", &apply).await.is_err() {
                    debug!(round, "Round timer retired");
                    break;
                }
            }
        })
    }

    fn spawn_after<F, Fut>(self: &Arc<Self>, delay: Duration, task: F) -> JoinHandle<()>
    where
        F: FnOnce(Arc<Inner>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let weak: Weak<Inner> = Arc::downgrade(self);
        tokio::spawn(async move {
            sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                task(inner).await;
            }
        })
    }
}

fn log_event(event: &LobbyEvent) {
    match event {
        LobbyEvent::LobbyCreated { lobby_id, .. } => info!(%lobby_id, "Lobby created"),
        LobbyEvent::PlayerJoined {
            lobby_id, players, ..
        } => info!(%lobby_id, players = players.len(), "Player joined"),
        LobbyEvent::BotAdded { player, .. } => info!(bot = %player.name, "Bot added"),
        LobbyEvent::RoundStarted { round, .. } => info!(round, "Round started"),
        LobbyEvent::CorrectGuess {
            player_id, points, ..
        } => info!(%player_id, points, "Correct guess"),
        LobbyEvent::RoundEnded { word, .. } => info!(%word, "Round ended"),
        other => debug!(event_type = other.event_type(), "Lobby event"),
    }
}
