use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game::Player;

/// Humans and bots together
pub const MAX_LOBBY_PLAYERS: usize = 4;

/// Names handed out to bots, each at most once per lobby
pub const BOT_NAMES: [&str; 4] = ["Bot Alice", "Bot Bob", "Bot Charlie", "Bot Diana"];

/// Pick an unused bot name at random, `None` once the pool is exhausted
pub fn pick_bot_name<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Option<&'static str> {
    let available: Vec<&'static str> = BOT_NAMES
        .iter()
        .copied()
        .filter(|name| !players.iter().any(|p| p.name == *name))
        .collect();

    available.choose(rng).copied()
}

/// Bots that still have something to guess this round, in roster order
pub fn pending_bots<'a>(
    players: &'a [Player],
    has_guessed: impl Fn(&Player) -> bool + 'a,
) -> impl Iterator<Item = &'a Player> + 'a {
    players.iter().filter(move |p| p.is_bot && !has_guessed(p))
}
