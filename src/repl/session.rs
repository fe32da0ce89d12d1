use std::sync::Arc;

use console::style;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor, ExternalPrinter as _};
use tokio::sync::mpsc;

use crate::client::{AnalysisBackend, HttpAnalysisClient};
use crate::config::{self, Settings, Theme};
use crate::errors::MedscanError;
use crate::repl::banner;
use crate::repl::commands::{self, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::events::UploadEvent;
use crate::repl::overlay;
use crate::repl::renderer;
use crate::session::UploadController;

pub struct ReplSession {
    base_url: String,
}

impl ReplSession {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub async fn run(self) -> Result<(), MedscanError> {
        banner::show_splash(&self.base_url);

        let mut settings = Settings::load(config::SETTINGS_DIR);
        let mut theme = settings.theme();

        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UploadEvent>();
        let backend = Arc::new(HttpAnalysisClient::new(&self.base_url));
        let controller = UploadController::new(backend.clone(), event_tx);

        // Set up rustyline editor
        let rl_config = Config::builder().auto_add_history(true).build();
        let mut editor: Editor<ReplHelper, DefaultHistory> = Editor::with_config(rl_config)
            .map_err(|e| MedscanError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper::default()));

        // ExternalPrinter lets completion events print while readline is
        // active; a running submission never blocks the prompt.
        let printer = editor
            .create_external_printer()
            .map_err(|e| MedscanError::Internal(format!("Failed to create printer: {}", e)))?;
        let printer = Arc::new(tokio::sync::Mutex::new(printer));

        let printer_clone = printer.clone();
        let event_task = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                // Preview lines are printed inline by /open itself.
                if matches!(event, UploadEvent::PreviewReady { .. }) {
                    continue;
                }
                let line = renderer::render_event(&event);
                let mut p = printer_clone.lock().await;
                let _ = p.print(format!("{}\n", line));
            }
        });

        // Main readline loop
        loop {
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let result = tokio::task::spawn_blocking({
                    move || {
                        let prompt = format!("{} ", style("medscan>").cyan().bold());
                        let result = editor.readline(&prompt);
                        (editor, result)
                    }
                })
                .await
                .map_err(|e| MedscanError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match commands::parse_command(trimmed) {
                        Ok(cmd) => {
                            let should_exit = handle_command(
                                cmd,
                                &controller,
                                backend.as_ref(),
                                &mut settings,
                                &mut theme,
                                &self.base_url,
                            )
                            .await;
                            if should_exit {
                                break;
                            }
                        }
                        Err(msg) => {
                            println!("{}", renderer::render_error(&msg));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        // Clean up
        drop(controller);
        let _ = event_task.await;

        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }
}

async fn handle_command(
    cmd: SlashCommand,
    controller: &UploadController,
    backend: &HttpAnalysisClient,
    settings: &mut Settings,
    theme: &mut Theme,
    base_url: &str,
) -> bool {
    match cmd {
        SlashCommand::Exit => return true,

        SlashCommand::Clear => {
            print!("\x1B[2J\x1B[1;1H");
        }

        SlashCommand::Open { path } => {
            match controller.select_file(std::path::Path::new(&path)).await {
                Ok(preview) => {
                    // Preview appears immediately; the verdict arrives as an
                    // event whenever the endpoint answers.
                    println!("{}", renderer::render_preview(&preview, *theme));
                }
                Err(e) => {
                    println!("{}", renderer::render_error(&e.to_string()));
                }
            }
        }

        SlashCommand::Result => {
            // Silent guard: revealing with nothing stored does nothing.
            if let Some(verdict) = controller.reveal_latest().await {
                print!("{}", renderer::render_verdict_card(&verdict, *theme));
            }
        }

        SlashCommand::Marker { x, y } => {
            controller.add_defect_marker(x, y).await;
            println!(
                "{}",
                renderer::render_success(&format!("Marker placed at {}%, {}%", x, y))
            );
        }

        SlashCommand::Markers => {
            let markers = controller.markers().await;
            if markers.is_empty() {
                println!("{}", renderer::render_info("No markers placed."));
            }
            print!("{}", overlay::render_overlay(&markers));
        }

        SlashCommand::Theme { value } => match value.as_deref() {
            None => {
                println!("{}", renderer::render_info(&format!("Theme: {}", theme)));
            }
            Some(input) => {
                let next = if input == "toggle" {
                    Ok(theme.toggled())
                } else {
                    input.parse::<Theme>()
                };
                match next {
                    Ok(next) => {
                        *theme = next;
                        match settings.set_theme(next) {
                            Ok(()) => println!(
                                "{}",
                                renderer::render_success(&format!("Theme set to {}", next))
                            ),
                            Err(e) => println!(
                                "{}",
                                renderer::render_error(&format!("Could not persist theme: {}", e))
                            ),
                        }
                    }
                    Err(msg) => println!("{}", renderer::render_error(&msg)),
                }
            }
        },

        SlashCommand::Status => {
            print!(
                "{}",
                renderer::render_status(
                    controller.status().await,
                    base_url,
                    controller.markers().await.len(),
                    controller.has_result().await,
                    *theme,
                )
            );
        }

        SlashCommand::Admin { confirm } => {
            if !confirm {
                println!(
                    "{}",
                    renderer::render_info(
                        "This provisions a demo admin account on the service. \
                         Run /admin confirm to proceed."
                    )
                );
            } else {
                match backend.create_admin().await {
                    Ok(reply) => {
                        println!("{}", renderer::render_success(&reply.message));
                        if reply.created() {
                            // Credentials stay server-side on purpose.
                            println!(
                                "{}",
                                renderer::render_info(
                                    "Credentials are managed by the service operator."
                                )
                            );
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "create_admin failed");
                        println!("{}", renderer::render_error("Failed to create admin user"));
                    }
                }
            }
        }

        SlashCommand::Version => {
            println!("{}", renderer::render_version());
        }

        SlashCommand::Help { command } => {
            print!("{}", renderer::render_help(command.as_deref()));
        }
    }

    false
}
