pub mod types;

pub use types::MedscanError;
