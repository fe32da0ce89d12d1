use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use super::commands::AnalyzeArgs;
use crate::client::HttpAnalysisClient;
use crate::config::Theme;
use crate::errors::MedscanError;
use crate::repl::progress::AnalysisProgress;
use crate::repl::renderer;
use crate::session::{StatusLine, UploadController};

/// One-shot headless flow: select the file, wait for the verdict, reveal
/// it. The explicit invocation stands in for the REPL's separate reveal
/// step.
pub async fn handle_analyze(
    args: AnalyzeArgs,
    base_url: String,
    theme: Theme,
) -> Result<(), MedscanError> {
    let backend = Arc::new(HttpAnalysisClient::new(&base_url));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let controller = UploadController::new(backend, event_tx);

    let progress = AnalysisProgress::start(&args.file);
    let preview = controller
        .select_file_and_wait(Path::new(&args.file))
        .await?;
    progress.clear();

    while let Ok(event) = event_rx.try_recv() {
        debug!(?event, "upload event");
    }

    if controller.status().await == StatusLine::AnalysisError {
        return Err(MedscanError::Analysis(
            "please try again with a different image".into(),
        ));
    }

    if !args.json {
        println!("{}", renderer::render_preview(&preview, theme));
    }

    match controller.reveal_latest().await {
        Some(verdict) if args.json => {
            println!("{}", serde_json::to_string_pretty(&verdict.raw)?);
        }
        Some(verdict) => {
            print!("{}", renderer::render_verdict_card(&verdict, theme));
        }
        None => {
            // Nothing stored and no error: nothing to reveal.
        }
    }

    Ok(())
}
