use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a submission is in flight. The REPL stays
/// interactive; this only occupies one status line.
pub struct AnalysisProgress {
    bar: ProgressBar,
}

impl AnalysisProgress {
    pub fn start(filename: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(format!("Analyzing {}...", filename));
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Self { bar }
    }

    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}
