use super::commands::AdminArgs;
use crate::client::{AnalysisBackend, HttpAnalysisClient};
use crate::errors::MedscanError;

/// Gated admin utility. Relays the service's message verbatim but never
/// surfaces default credentials; those stay with the service operator.
pub async fn handle_admin(args: AdminArgs, base_url: String) -> Result<(), MedscanError> {
    if !args.confirm {
        return Err(MedscanError::Config(
            "refusing to provision the demo admin account without --confirm".into(),
        ));
    }

    let client = HttpAnalysisClient::new(&base_url);
    let reply = client.create_admin().await?;
    println!("{}", reply.message);
    if reply.created() {
        println!("Admin account provisioned. Credentials are managed by the service operator.");
    }

    Ok(())
}
