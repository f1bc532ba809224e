pub mod handler;
pub mod messages;

pub use handler::ActionHandler;
pub use messages::ClientAction;
