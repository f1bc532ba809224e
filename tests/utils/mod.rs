pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{drain_events, LobbyAssertion};
#[allow(unused_imports)]
pub use setup::{advance, TestSetup, TestSetupBuilder};
