pub mod controller;
pub mod state;

pub use controller::{RevealedVerdict, UploadController};
pub use state::{ResultSlot, StatusLine, StoreOutcome, StoredResult, SubmissionToken};
