use super::commands::ValidateArgs;
use crate::config;
use crate::errors::MedscanError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), MedscanError> {
    let path = std::path::PathBuf::from(&args.config);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
