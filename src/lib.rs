pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod preview;
pub mod repl;
pub mod session;
