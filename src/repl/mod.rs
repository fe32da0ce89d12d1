pub mod banner;
pub mod commands;
pub mod completer;
pub mod events;
pub mod overlay;
pub mod progress;
pub mod renderer;
pub mod session;

pub use session::ReplSession;
