use console::{style, Term};
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

const DIM: u8 = 240;

const TAGLINE: &str = "X-Ray Defect Analysis Client";

/// Show the startup banner. Terminal counterpart of the service's hero
/// section, in the same cyan/aqua palette.
pub fn show_splash(endpoint: &str) {
    let term = Term::stdout();
    let (_, term_cols) = term.size();
    let term_w = term_cols as usize;

    let palette = Palette::from_hex(&[
        "#64FFDA", // aqua highlight
        "#00B4D8", // cyan core
        "#0077B6", // deep blue
        "#48CAE4", // sky
    ]);
    let gradient = Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal);

    let banner_text = match Banner::new("MEDSCAN") {
        Ok(b) => b
            .gradient(gradient)
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .color_mode(ColorMode::TrueColor)
            .width(term_w)
            .render(),
        Err(_) => {
            // Fallback if the FIGlet font fails
            format!("  {}\n", style("MEDSCAN").cyan().bold())
        }
    };

    println!();
    print!("{}", banner_text);

    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    println!("  {}", style(format!("v{} ({})", version, git_hash)).color256(DIM));
    println!("  {}", style(TAGLINE).cyan());
    println!("  {}", style(format!("endpoint: {}", endpoint)).color256(DIM));
    println!(
        "  {}",
        style("Type /open <file> to analyze an image, /help for commands.").color256(DIM)
    );
    println!();
}
