use std::env;
use std::time::Duration;

use crate::bot::MAX_LOBBY_PLAYERS;
use crate::shared::AppError;

/// Tunables for a lobby: round pacing, bot behaviour and capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Seconds on the clock when a round starts
    pub round_seconds: u32,
    /// Period of the countdown tick
    pub tick_interval: Duration,
    /// Period of the hint reveal tick
    pub hint_interval: Duration,
    /// Pause before the scoreboard after a human completes the roster
    pub round_end_delay: Duration,
    /// Pause before the scoreboard after a bot completes the roster
    pub bot_round_end_delay: Duration,
    /// Fixed part of the bots' reaction to a human solving the word
    pub bot_reaction_base: Duration,
    /// Random part of the bots' reaction, drawn uniformly from zero to this
    pub bot_reaction_jitter: Duration,
    /// Offset added per bot so they do not all answer at once
    pub bot_stagger: Duration,
    /// Random part of each bot's own delay
    pub bot_jitter: Duration,
    pub bot_base_chance: f64,
    pub bot_chance_per_hint: f64,
    pub min_players_to_start: usize,
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: 60,
            tick_interval: Duration::from_secs(1),
            hint_interval: Duration::from_secs(15),
            round_end_delay: Duration::from_secs(2),
            bot_round_end_delay: Duration::from_secs(1),
            bot_reaction_base: Duration::from_secs(1),
            bot_reaction_jitter: Duration::from_secs(3),
            bot_stagger: Duration::from_secs(2),
            bot_jitter: Duration::from_secs(3),
            bot_base_chance: 0.2,
            bot_chance_per_hint: 0.15,
            min_players_to_start: 2,
            max_players: MAX_LOBBY_PLAYERS,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `WORDHINT_*` environment variables where set
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(seconds) = read_var::<u32>("WORDHINT_ROUND_SECONDS")? {
            config.round_seconds = seconds;
        }
        if let Some(period) = read_period("WORDHINT_HINT_INTERVAL_SECONDS")? {
            config.hint_interval = period;
        }
        if let Some(chance) = read_var::<f64>("WORDHINT_BOT_BASE_CHANCE")? {
            config.bot_base_chance = chance;
        }
        if let Some(chance) = read_var::<f64>("WORDHINT_BOT_CHANCE_PER_HINT")? {
            config.bot_chance_per_hint = chance;
        }

        Ok(config)
    }
}

fn read_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("Invalid {}: {}", name, raw))),
        Err(_) => Ok(None),
    }
}

/// A timer period in whole seconds; zero would never tick
fn read_period(name: &str) -> Result<Option<Duration>, AppError> {
    match read_var::<u64>(name)? {
        Some(0) => Err(AppError::Config(format!("{} must be at least 1", name))),
        Some(seconds) => Ok(Some(Duration::from_secs(seconds))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let config = GameConfig::default();

        assert_eq!(config.round_seconds, 60);
        assert_eq!(config.hint_interval, Duration::from_secs(15));
        assert_eq!(config.round_end_delay, Duration::from_secs(2));
        assert_eq!(config.bot_round_end_delay, Duration::from_secs(1));
        assert_eq!(config.max_players, 4);
    }

    #[test]
    fn test_read_var_rejects_garbage() {
        env::set_var("WORDHINT_TEST_GARBAGE", "sixty");
        let result = read_var::<u32>("WORDHINT_TEST_GARBAGE");
        env::remove_var("WORDHINT_TEST_GARBAGE");

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("sixty")));
    }

    #[test]
    fn test_zero_period_rejected() {
        env::set_var("WORDHINT_TEST_ZERO_PERIOD", "0");
        let result = read_period("WORDHINT_TEST_ZERO_PERIOD");
        env::remove_var("WORDHINT_TEST_ZERO_PERIOD");

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("at least 1")));
    }

    #[test]
    fn test_period_in_seconds() {
        env::set_var("WORDHINT_TEST_PERIOD", " 5 ");
        let result = read_period("WORDHINT_TEST_PERIOD").unwrap();
        env::remove_var("WORDHINT_TEST_PERIOD");

        assert_eq!(result, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_read_var_missing_is_none() {
        let result = read_var::<u32>("WORDHINT_TEST_NEVER_SET").unwrap();
        assert_eq!(result, None);
    }
}
