pub mod runtime;
pub mod timers;

pub use runtime::LobbyHandle;
pub use timers::RoundTimers;
