pub mod admin;
pub mod analyze;
pub mod commands;
pub mod theme;
pub mod validate;

pub use commands::{Cli, Commands};
