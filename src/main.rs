use clap::Parser;
use tracing_subscriber::EnvFilter;

use medscan::cli::{self, Cli, Commands};
use medscan::config::{self, Settings};
use medscan::errors::MedscanError;
use medscan::repl::ReplSession;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                MedscanError::Config(_) => 2,
                MedscanError::InvalidFile(_) => 3,
                MedscanError::Analysis(_) => 4,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: Cli) -> Result<(), MedscanError> {
    let file_config = match &cli.config {
        Some(path) => config::parse_config(std::path::Path::new(path)).await?,
        None => config::load_default_config().await,
    };
    let base_url = config::resolve_base_url(cli.endpoint.as_deref(), &file_config);
    let settings = Settings::load(config::SETTINGS_DIR);

    match cli.command {
        Some(Commands::Analyze(args)) => {
            cli::analyze::handle_analyze(args, base_url, settings.theme()).await
        }
        Some(Commands::Theme(args)) => cli::theme::handle_theme(args).await,
        Some(Commands::Admin(args)) => cli::admin::handle_admin(args, base_url).await,
        Some(Commands::Validate(args)) => cli::validate::handle_validate(args).await,
        None => ReplSession::new(base_url).run().await,
    }
}
