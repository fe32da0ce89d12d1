/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    /// Select an image file for preview and analysis.
    Open { path: String },
    /// Reveal the most recently stored verdict.
    Result,
    /// Place a defect marker at percentage coordinates.
    Marker { x: f64, y: f64 },
    /// Show the marker overlay.
    Markers,
    /// Show or change the display theme.
    Theme { value: Option<String> },
    /// Show session status (endpoint, submission state, markers).
    Status,
    /// Provision the demo admin account on the service.
    Admin { confirm: bool },
    Version,
    Clear,
    Help { command: Option<String> },
    Exit,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "open",
        usage: "/open <path>",
        description: "Select an X-ray image: shows a preview immediately and submits it for analysis in the background",
    },
    CommandHelp {
        name: "result",
        usage: "/result",
        description: "Reveal the latest stored verdict (does nothing if no analysis has completed yet)",
    },
    CommandHelp {
        name: "marker",
        usage: "/marker <x%> <y%>",
        description: "Place a defect marker at percentage coordinates over the preview",
    },
    CommandHelp {
        name: "markers",
        usage: "/markers",
        description: "Show the marker overlay grid",
    },
    CommandHelp {
        name: "theme",
        usage: "/theme [dark|light|toggle]",
        description: "Show or change the persisted display theme",
    },
    CommandHelp {
        name: "status",
        usage: "/status",
        description: "Show the endpoint and the current submission state",
    },
    CommandHelp {
        name: "admin",
        usage: "/admin confirm",
        description: "Provision the demo admin account on the service (requires the explicit confirm argument)",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Clear the terminal screen",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the REPL",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/open", "/result", "/marker", "/markers", "/theme", "/status", "/admin",
    "/version", "/clear", "/help", "/exit",
];

/// Parse a raw input line into a SlashCommand, or return an error message.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Err("Commands must start with /. Type /help for available commands.".into());
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return Err("Empty command".into());
    }

    let cmd = parts[0];
    let args = &parts[1..];

    match cmd {
        "/open" => parse_open(args),
        "/result" => Ok(SlashCommand::Result),
        "/marker" => parse_marker(args),
        "/markers" => Ok(SlashCommand::Markers),
        "/theme" => parse_theme(args),
        "/status" => Ok(SlashCommand::Status),
        "/admin" => parse_admin(args),
        "/version" => Ok(SlashCommand::Version),
        "/clear" => Ok(SlashCommand::Clear),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!(
            "Unknown command: {}. Type /help for available commands.",
            other
        )),
    }
}

fn parse_open(args: &[&str]) -> Result<SlashCommand, String> {
    if args.is_empty() {
        return Err("Usage: /open <path>".into());
    }
    // Paths may contain spaces; take the rest of the line as-is.
    Ok(SlashCommand::Open {
        path: args.join(" "),
    })
}

fn parse_marker(args: &[&str]) -> Result<SlashCommand, String> {
    let (x, y) = match args {
        [x, y] => (x, y),
        _ => return Err("Usage: /marker <x%> <y%>".into()),
    };
    let x: f64 = x.parse().map_err(|_| format!("Invalid x coordinate: {}", x))?;
    let y: f64 = y.parse().map_err(|_| format!("Invalid y coordinate: {}", y))?;
    Ok(SlashCommand::Marker { x, y })
}

fn parse_theme(args: &[&str]) -> Result<SlashCommand, String> {
    match args {
        [] => Ok(SlashCommand::Theme { value: None }),
        [value] => Ok(SlashCommand::Theme {
            value: Some(value.to_string()),
        }),
        _ => Err("Usage: /theme [dark|light|toggle]".into()),
    }
}

fn parse_admin(args: &[&str]) -> Result<SlashCommand, String> {
    match args {
        [] => Ok(SlashCommand::Admin { confirm: false }),
        ["confirm"] => Ok(SlashCommand::Admin { confirm: true }),
        [other, ..] => Err(format!(
            "Unknown argument for /admin: {}. Use: /admin confirm",
            other
        )),
    }
}
