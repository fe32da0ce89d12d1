pub mod admin;
pub mod analysis;

pub use admin::*;
pub use analysis::*;
