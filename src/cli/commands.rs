use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "medscan",
    version,
    about = "Terminal client for the MedScan X-ray defect analysis service"
)]
pub struct Cli {
    /// Omit the subcommand to start the interactive REPL
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Analysis service base URL (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload one image and print its verdict (headless)
    Analyze(AnalyzeArgs),
    /// Show or change the persisted display theme
    Theme(ThemeArgs),
    /// Provision the demo admin account on the service
    Admin(AdminArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Path to the X-ray image to analyze
    pub file: String,

    /// Print the raw JSON verdict instead of the rendered card
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ThemeArgs {
    /// dark | light | toggle (omit to show the current theme)
    pub action: Option<String>,
}

#[derive(Args, Clone)]
pub struct AdminArgs {
    /// Acknowledge that this provisions a demo admin account on the service
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
