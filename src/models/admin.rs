use serde::{Deserialize, Serialize};

/// Response of the admin provisioning endpoint. Only `message` is defined;
/// callers pattern-match it for the "successfully" marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMessage {
    pub message: String,
}

impl AdminMessage {
    /// Whether the service reports a fresh admin account was created (as
    /// opposed to one already existing).
    pub fn created(&self) -> bool {
        self.message.contains("successfully")
    }
}
