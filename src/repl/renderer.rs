use console::{style, Style};

use crate::config::Theme;
use crate::models::{Classification, FIXED_CONFIDENCE};
use crate::preview::Preview;
use crate::repl::commands::COMMAND_HELP;
use crate::repl::events::UploadEvent;
use crate::session::{RevealedVerdict, StatusLine};

/// Accent style per theme. Dark mirrors the service front end's cyan; on
/// light terminals plain cyan is unreadable, so blue stands in.
fn accent(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::new().cyan(),
        Theme::Light => Style::new().blue(),
    }
}

/// Render an upload event as a styled line for the event stream.
pub fn render_event(event: &UploadEvent) -> String {
    match event {
        UploadEvent::PreviewReady { filename, byte_len } => format!(
            "  {} Preview ready: {} ({} bytes)",
            style("✓").green(),
            filename,
            byte_len,
        ),
        UploadEvent::SubmissionStarted { filename } => format!(
            "  {} Analyzing {}...",
            style("⏳").yellow(),
            style(filename).yellow(),
        ),
        UploadEvent::AnalysisStored { filename } => format!(
            "  {} Analysis of {} complete. Type {} to view.",
            style("✓").green(),
            style(filename).green(),
            style("/result").bold(),
        ),
        UploadEvent::AnalysisFailed { .. } => format!(
            "  {} {}. {}",
            style("✗").red(),
            style("Analysis error").red().bold(),
            style("Please try again with a different image.").dim(),
        ),
        UploadEvent::StaleResponseDropped { filename } => format!(
            "  {}",
            style(format!("Superseded response for {} dropped.", filename)).dim(),
        ),
        UploadEvent::Log { message } => format!("  {}", style(message).dim()),
    }
}

/// One line summarizing a freshly built preview.
pub fn render_preview(preview: &Preview, theme: Theme) -> String {
    format!(
        "  {} {} ({} bytes, {})",
        accent(theme).apply_to("Preview:"),
        style(&preview.filename).bold(),
        preview.byte_len,
        // Just the content-type part of the data URL; the payload is long.
        preview
            .data_url
            .split(';')
            .next()
            .unwrap_or("data:")
            .trim_start_matches("data:"),
    )
}

/// The verdict card shown by the reveal action: two mutually exclusive
/// visual states plus the fixed confidence line.
pub fn render_verdict_card(verdict: &RevealedVerdict, theme: Theme) -> String {
    let label = match verdict.classification {
        Classification::Defective => style("Defective").red().bold(),
        Classification::NonDefective => style("Non-Defective").green().bold(),
    };
    let mut out = String::new();
    out.push_str(&format!(
        "\n  {} {}\n",
        accent(theme).apply_to("Verdict:"),
        label,
    ));
    out.push_str(&format!("  {}\n", style(FIXED_CONFIDENCE).bold()));
    out.push_str(&format!(
        "  {}\n",
        style(format!(
            "{} · received {}",
            verdict.filename,
            verdict.received_at.format("%H:%M:%S"),
        ))
        .dim(),
    ));
    out
}

/// Session status block for /status.
pub fn render_status(
    status: StatusLine,
    endpoint: &str,
    marker_count: usize,
    has_result: bool,
    theme: Theme,
) -> String {
    let state = match status {
        StatusLine::Idle => style("no image selected yet").dim().to_string(),
        StatusLine::Analyzing => style("analyzing...").yellow().to_string(),
        StatusLine::ResultReady => style("result ready, type /result to view").green().to_string(),
        StatusLine::AnalysisError => style("analysis error").red().to_string(),
    };
    let mut out = String::new();
    out.push_str(&format!("  {} {}\n", accent(theme).apply_to("Endpoint:"), endpoint));
    out.push_str(&format!("  {} {}\n", accent(theme).apply_to("State:"), state));
    out.push_str(&format!(
        "  {} {} stored, {} marker(s)\n",
        accent(theme).apply_to("Session:"),
        if has_result { "1 result" } else { "no result" },
        marker_count,
    ));
    out
}

pub fn render_error(msg: &str) -> String {
    format!("  {} {}", style("✗").red(), style(msg).red())
}

pub fn render_info(msg: &str) -> String {
    format!("  {}", style(msg).dim())
}

pub fn render_success(msg: &str) -> String {
    format!("  {} {}", style("✓").green(), msg)
}

/// Help for all commands, or a single one.
pub fn render_help(command: Option<&str>) -> String {
    let mut out = String::new();
    match command {
        Some(name) => match COMMAND_HELP.iter().find(|h| h.name == name) {
            Some(help) => {
                out.push_str(&format!("  {}\n", style(help.usage).bold()));
                out.push_str(&format!("  {}\n", help.description));
            }
            None => {
                out.push_str(&render_error(&format!("No such command: {}", name)));
                out.push('\n');
            }
        },
        None => {
            out.push_str(&format!("  {}\n\n", style("Commands").bold()));
            for help in COMMAND_HELP {
                out.push_str(&format!(
                    "  {:<28} {}\n",
                    style(help.usage).cyan(),
                    help.description,
                ));
            }
        }
    }
    out
}

pub fn render_version() -> String {
    format!(
        "  medscan v{} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_HASH").unwrap_or("dev"),
        option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
    )
}
