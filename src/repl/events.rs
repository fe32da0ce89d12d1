/// Messages sent from the upload controller to the REPL for display.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// A local preview was built; shown immediately, before any network
    /// activity resolves.
    PreviewReady { filename: String, byte_len: usize },
    /// The image is on its way to the analysis endpoint.
    SubmissionStarted { filename: String },
    /// A verdict arrived and is stored; the user must reveal it explicitly.
    AnalysisStored { filename: String },
    /// The submission failed. Carries no cause; every failure surfaces as
    /// the same generic analysis error.
    AnalysisFailed { filename: String },
    /// A response arrived for a submission that was superseded meanwhile.
    StaleResponseDropped { filename: String },
    /// Informational log line.
    Log { message: String },
}
