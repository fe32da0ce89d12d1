use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::client::AnalysisBackend;
use crate::errors::MedscanError;
use crate::models::{AnalysisResult, Classification, DefectLocation};
use crate::preview::{self, Preview};
use crate::repl::events::UploadEvent;

use super::state::{ResultSlot, StatusLine, StoreOutcome, StoredResult, SubmissionToken};

/// Snapshot handed to the renderer by a reveal.
#[derive(Debug, Clone)]
pub struct RevealedVerdict {
    pub classification: Classification,
    pub filename: String,
    pub received_at: DateTime<Utc>,
    pub raw: AnalysisResult,
}

/// Handles a submission task needs after the controller hands it off.
struct SubmissionHandles {
    backend: Arc<dyn AnalysisBackend>,
    slot: Arc<Mutex<ResultSlot>>,
    status: Arc<Mutex<StatusLine>>,
    events: mpsc::UnboundedSender<UploadEvent>,
}

/// Mediates between a user-selected image file and the remote analysis
/// service, and between the stored verdict and its on-demand display.
///
/// Owns the single latest-result slot: submissions write it through a
/// token guard, the reveal action reads it, nothing else touches it.
pub struct UploadController {
    backend: Arc<dyn AnalysisBackend>,
    slot: Arc<Mutex<ResultSlot>>,
    status: Arc<Mutex<StatusLine>>,
    markers: Arc<Mutex<Vec<DefectLocation>>>,
    events: mpsc::UnboundedSender<UploadEvent>,
}

impl UploadController {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        events: mpsc::UnboundedSender<UploadEvent>,
    ) -> Self {
        Self {
            backend,
            slot: Arc::new(Mutex::new(ResultSlot::new())),
            status: Arc::new(Mutex::new(StatusLine::Idle)),
            markers: Arc::new(Mutex::new(Vec::new())),
            events,
        }
    }

    /// Select an image: emit its preview immediately, then submit it for
    /// analysis in the background. The preview never waits on the network.
    /// Any file that can be read is accepted and forwarded.
    pub async fn select_file(&self, path: &Path) -> Result<Preview, MedscanError> {
        let (preview, token, bytes) = self.prepare(path).await?;
        tokio::spawn(Self::run_submission(
            self.handles(),
            token,
            preview.filename.clone(),
            bytes,
        ));
        Ok(preview)
    }

    /// Headless variant of [`select_file`](Self::select_file): same flow,
    /// but waits for the submission to finish before returning.
    pub async fn select_file_and_wait(&self, path: &Path) -> Result<Preview, MedscanError> {
        let (preview, token, bytes) = self.prepare(path).await?;
        Self::run_submission(self.handles(), token, preview.filename.clone(), bytes).await;
        Ok(preview)
    }

    async fn prepare(
        &self,
        path: &Path,
    ) -> Result<(Preview, SubmissionToken, Vec<u8>), MedscanError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MedscanError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let preview = preview::build_preview(path, &bytes);
        let _ = self.events.send(UploadEvent::PreviewReady {
            filename: preview.filename.clone(),
            byte_len: preview.byte_len,
        });

        let token = self.slot.lock().await.begin_submission();
        self.markers.lock().await.clear();
        *self.status.lock().await = StatusLine::Analyzing;
        let _ = self.events.send(UploadEvent::SubmissionStarted {
            filename: preview.filename.clone(),
        });
        debug!(filename = %preview.filename, "submission started");

        Ok((preview, token, bytes))
    }

    fn handles(&self) -> SubmissionHandles {
        SubmissionHandles {
            backend: self.backend.clone(),
            slot: self.slot.clone(),
            status: self.status.clone(),
            events: self.events.clone(),
        }
    }

    async fn run_submission(
        handles: SubmissionHandles,
        token: SubmissionToken,
        filename: String,
        bytes: Vec<u8>,
    ) {
        match handles.backend.analyze(&filename, bytes).await {
            Ok(result) => {
                let outcome = handles.slot.lock().await.store(
                    token,
                    StoredResult {
                        result,
                        filename: filename.clone(),
                        received_at: Utc::now(),
                    },
                );
                match outcome {
                    StoreOutcome::Stored => {
                        *handles.status.lock().await = StatusLine::ResultReady;
                        let _ = handles
                            .events
                            .send(UploadEvent::AnalysisStored { filename });
                    }
                    StoreOutcome::Stale => {
                        debug!(filename = %filename, "dropping superseded analysis response");
                        let _ = handles
                            .events
                            .send(UploadEvent::StaleResponseDropped { filename });
                    }
                }
            }
            Err(e) => {
                // The cause is only logged. Transport failures, error
                // statuses, and undecodable bodies all surface as the one
                // generic analysis-error state.
                warn!(error = %e, filename = %filename, "analysis failed");
                if handles.slot.lock().await.is_current(token) {
                    *handles.status.lock().await = StatusLine::AnalysisError;
                }
                let _ = handles
                    .events
                    .send(UploadEvent::AnalysisFailed { filename });
            }
        }
    }

    /// Nullable read behind the explicit reveal action. `None` means no
    /// analysis has completed yet, and that is not an error.
    pub async fn reveal_latest(&self) -> Option<RevealedVerdict> {
        let slot = self.slot.lock().await;
        slot.latest().map(|stored| RevealedVerdict {
            classification: Classification::from_result(&stored.result),
            filename: stored.filename.clone(),
            received_at: stored.received_at,
            raw: stored.result.clone(),
        })
    }

    /// Place a marker at normalized percentage coordinates over the
    /// preview. Standalone primitive; nothing in the analysis flow calls it.
    pub async fn add_defect_marker(&self, x: f64, y: f64) {
        self.markers.lock().await.push(DefectLocation { x, y });
    }

    pub async fn markers(&self) -> Vec<DefectLocation> {
        self.markers.lock().await.clone()
    }

    pub async fn status(&self) -> StatusLine {
        *self.status.lock().await
    }

    pub async fn has_result(&self) -> bool {
        self.slot.lock().await.latest().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::models::AdminMessage;

    /// Backend that answers per-filename from a script, after an optional
    /// delay. Delays use tokio time, so paused-clock tests stay
    /// deterministic.
    struct ScriptedBackend {
        script: Vec<(String, Duration, Result<AnalysisResult, String>)>,
    }

    #[async_trait]
    impl AnalysisBackend for ScriptedBackend {
        async fn analyze(
            &self,
            filename: &str,
            _bytes: Vec<u8>,
        ) -> Result<AnalysisResult, MedscanError> {
            for (name, delay, response) in &self.script {
                if name == filename {
                    tokio::time::sleep(*delay).await;
                    return response.clone().map_err(MedscanError::Network);
                }
            }
            panic!("unscripted file: {}", filename);
        }

        async fn create_admin(&self) -> Result<AdminMessage, MedscanError> {
            Ok(AdminMessage {
                message: "Admin user created successfully".into(),
            })
        }
    }

    fn verdict(status: &str) -> AnalysisResult {
        AnalysisResult {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn controller_with(
        script: Vec<(String, Duration, Result<AnalysisResult, String>)>,
    ) -> (UploadController, mpsc::UnboundedReceiver<UploadEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = Arc::new(ScriptedBackend { script });
        (UploadController::new(backend, tx), rx)
    }

    fn temp_image(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"fake image bytes").unwrap();
        path
    }

    #[tokio::test]
    async fn test_reveal_before_any_submission_is_silent_noop() {
        let (controller, _rx) = controller_with(vec![]);
        assert!(controller.reveal_latest().await.is_none());
        assert_eq!(controller.status().await, StatusLine::Idle);
    }

    #[tokio::test]
    async fn test_successful_submission_stores_without_revealing() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_image(&dir, "chest.png");
        let (controller, mut rx) = controller_with(vec![(
            "chest.png".into(),
            Duration::ZERO,
            Ok(verdict("Defective")),
        )]);

        let preview = controller.select_file_and_wait(&path).await.unwrap();
        assert!(preview.data_url.starts_with("data:image/png;base64,"));

        // Result is stored, not auto-rendered: status only prompts for the
        // explicit reveal.
        assert_eq!(controller.status().await, StatusLine::ResultReady);

        let revealed = controller.reveal_latest().await.unwrap();
        assert_eq!(revealed.classification, Classification::Defective);
        assert_eq!(revealed.filename, "chest.png");

        let mut saw_stored = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, UploadEvent::AnalysisStored { .. }) {
                saw_stored = true;
            }
        }
        assert!(saw_stored);
    }

    #[tokio::test]
    async fn test_failed_submission_sets_generic_error_and_leaves_slot_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_image(&dir, "broken.png");
        let (controller, mut rx) = controller_with(vec![(
            "broken.png".into(),
            Duration::ZERO,
            Err("connection refused".into()),
        )]);

        controller.select_file_and_wait(&path).await.unwrap();

        assert_eq!(controller.status().await, StatusLine::AnalysisError);
        assert!(controller.reveal_latest().await.is_none());

        let mut saw_failed = false;
        while let Ok(event) = rx.try_recv() {
            // The failure event carries no cause on purpose.
            if matches!(event, UploadEvent::AnalysisFailed { .. }) {
                saw_failed = true;
            }
        }
        assert!(saw_failed);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_rejected_without_submission() {
        let (controller, mut rx) = controller_with(vec![]);
        let err = controller
            .select_file(Path::new("/nonexistent/image.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, MedscanError::InvalidFile(_)));
        assert!(rx.try_recv().is_err());
        assert_eq!(controller.status().await, StatusLine::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_submission_supersedes_older_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let slow = temp_image(&dir, "slow.png");
        let fast = temp_image(&dir, "fast.png");
        let (controller, mut rx) = controller_with(vec![
            ("slow.png".into(), Duration::from_millis(500), Ok(verdict("Defective"))),
            ("fast.png".into(), Duration::from_millis(10), Ok(verdict("Non-Defective"))),
        ]);

        // Second selection happens while the first request is still in
        // flight; its token supersedes the first.
        controller.select_file(&slow).await.unwrap();
        controller.select_file(&fast).await.unwrap();

        // Wait until both completions reached the slot.
        let mut saw_stored = None;
        let mut saw_stale = None;
        while saw_stored.is_none() || saw_stale.is_none() {
            match rx.recv().await.unwrap() {
                UploadEvent::AnalysisStored { filename } => saw_stored = Some(filename),
                UploadEvent::StaleResponseDropped { filename } => saw_stale = Some(filename),
                _ => {}
            }
        }
        assert_eq!(saw_stored.as_deref(), Some("fast.png"));
        assert_eq!(saw_stale.as_deref(), Some("slow.png"));

        let revealed = controller.reveal_latest().await.unwrap();
        assert_eq!(revealed.filename, "fast.png");
        assert_eq!(revealed.classification, Classification::NonDefective);
        assert_eq!(controller.status().await, StatusLine::ResultReady);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_of_superseded_submission_keeps_newer_status() {
        let dir = tempfile::tempdir().unwrap();
        let slow = temp_image(&dir, "slow.png");
        let fast = temp_image(&dir, "fast.png");
        let (controller, mut rx) = controller_with(vec![
            ("slow.png".into(), Duration::from_millis(500), Err("reset".into())),
            ("fast.png".into(), Duration::from_millis(10), Ok(verdict("Defective"))),
        ]);

        controller.select_file(&slow).await.unwrap();
        controller.select_file(&fast).await.unwrap();

        let mut saw_stored = false;
        let mut saw_failed = false;
        while !(saw_stored && saw_failed) {
            match rx.recv().await.unwrap() {
                UploadEvent::AnalysisStored { .. } => saw_stored = true,
                UploadEvent::AnalysisFailed { .. } => saw_failed = true,
                _ => {}
            }
        }

        // The stale failure must not clobber the newer submission's state.
        assert_eq!(controller.status().await, StatusLine::ResultReady);
        assert!(controller.reveal_latest().await.is_some());
    }

    #[tokio::test]
    async fn test_new_submission_clears_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_image(&dir, "chest.png");
        let (controller, _rx) = controller_with(vec![(
            "chest.png".into(),
            Duration::ZERO,
            Ok(verdict("Non-Defective")),
        )]);

        controller.add_defect_marker(30.0, 40.0).await;
        controller.add_defect_marker(70.0, 60.0).await;
        assert_eq!(controller.markers().await.len(), 2);

        controller.select_file_and_wait(&path).await.unwrap();
        assert!(controller.markers().await.is_empty());
    }

    #[tokio::test]
    async fn test_marker_capability_is_decoupled_from_analysis() {
        let (controller, _rx) = controller_with(vec![]);
        controller.add_defect_marker(50.0, 25.0).await;
        let markers = controller.markers().await;
        assert_eq!(markers, vec![DefectLocation { x: 50.0, y: 25.0 }]);
        // Placing a marker neither submits nor stores anything.
        assert!(controller.reveal_latest().await.is_none());
        assert_eq!(controller.status().await, StatusLine::Idle);
    }
}
