use super::commands::ThemeArgs;
use crate::config::{self, Settings, Theme};
use crate::errors::MedscanError;

pub async fn handle_theme(args: ThemeArgs) -> Result<(), MedscanError> {
    let mut settings = Settings::load(config::SETTINGS_DIR);

    match args.action.as_deref() {
        None => {
            println!("{}", settings.theme());
        }
        Some("toggle") => {
            let next = settings.theme().toggled();
            settings.set_theme(next)?;
            println!("{}", next);
        }
        Some(value) => {
            let theme: Theme = value.parse().map_err(MedscanError::Config)?;
            settings.set_theme(theme)?;
            println!("{}", theme);
        }
    }

    Ok(())
}
