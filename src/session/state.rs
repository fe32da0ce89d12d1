use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::AnalysisResult;

/// Token identifying one submission. A completed response is only accepted
/// while its token is still the most recently issued one, so a newer
/// submission silently supersedes an older in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionToken(Uuid);

impl SubmissionToken {
    pub fn issue() -> Self {
        Self(Uuid::new_v4())
    }
}

/// What happened to a completed submission when it reached the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    Stale,
}

/// A successful analysis response together with its submission context.
#[derive(Debug, Clone)]
pub struct StoredResult {
    pub result: AnalysisResult,
    pub filename: String,
    pub received_at: DateTime<Utc>,
}

/// Visible status text driven by the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Idle,
    Analyzing,
    ResultReady,
    AnalysisError,
}

/// Single-slot holder for the most recent successful analysis.
///
/// Written by completed submissions and read only by the reveal action,
/// so submission and reveal stay decoupled. Exactly one "latest" result
/// exists at a time.
#[derive(Debug, Default)]
pub struct ResultSlot {
    current_token: Option<SubmissionToken>,
    latest: Option<StoredResult>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new submission. The returned token becomes current and every
    /// earlier token is stale from this point on.
    pub fn begin_submission(&mut self) -> SubmissionToken {
        let token = SubmissionToken::issue();
        self.current_token = Some(token);
        token
    }

    /// Store a completed result if its token is still current; a stale
    /// token leaves the slot untouched.
    pub fn store(&mut self, token: SubmissionToken, stored: StoredResult) -> StoreOutcome {
        if self.current_token == Some(token) {
            self.latest = Some(stored);
            StoreOutcome::Stored
        } else {
            StoreOutcome::Stale
        }
    }

    /// Nullable read used by the reveal action.
    pub fn latest(&self) -> Option<&StoredResult> {
        self.latest.as_ref()
    }

    pub fn is_current(&self, token: SubmissionToken) -> bool {
        self.current_token == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(filename: &str) -> StoredResult {
        StoredResult {
            result: AnalysisResult::default(),
            filename: filename.to_string(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_slot_empty_before_any_submission() {
        let slot = ResultSlot::new();
        assert!(slot.latest().is_none());
    }

    #[test]
    fn test_store_with_current_token() {
        let mut slot = ResultSlot::new();
        let token = slot.begin_submission();
        assert_eq!(slot.store(token, stored("a.png")), StoreOutcome::Stored);
        assert_eq!(slot.latest().unwrap().filename, "a.png");
    }

    #[test]
    fn test_stale_token_does_not_overwrite() {
        let mut slot = ResultSlot::new();
        let first = slot.begin_submission();
        let second = slot.begin_submission();

        // Responses arrive out of order: the newer submission lands first.
        assert_eq!(slot.store(second, stored("new.png")), StoreOutcome::Stored);
        assert_eq!(slot.store(first, stored("old.png")), StoreOutcome::Stale);
        assert_eq!(slot.latest().unwrap().filename, "new.png");
    }

    #[test]
    fn test_stale_token_dropped_even_into_empty_slot() {
        let mut slot = ResultSlot::new();
        let first = slot.begin_submission();
        let _second = slot.begin_submission();

        assert_eq!(slot.store(first, stored("old.png")), StoreOutcome::Stale);
        assert!(slot.latest().is_none());
    }

    #[test]
    fn test_newest_submission_overwrites_in_order() {
        let mut slot = ResultSlot::new();
        let first = slot.begin_submission();
        assert_eq!(slot.store(first, stored("one.png")), StoreOutcome::Stored);

        let second = slot.begin_submission();
        assert_eq!(slot.store(second, stored("two.png")), StoreOutcome::Stored);
        assert_eq!(slot.latest().unwrap().filename, "two.png");
    }

    #[test]
    fn test_is_current_tracks_latest_token() {
        let mut slot = ResultSlot::new();
        let first = slot.begin_submission();
        assert!(slot.is_current(first));
        let second = slot.begin_submission();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }
}
