use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::aws::Credentials;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
pub const REGION_VAR: &str = "AWS_REGION";

/// Render the shell-sourceable export lines for `creds`
pub fn render(creds: &Credentials, region: &str) -> String {
    [
        (ACCESS_KEY_ID_VAR, creds.access_key_id.as_str()),
        (SECRET_ACCESS_KEY_VAR, creds.secret_access_key.as_str()),
        (SESSION_TOKEN_VAR, creds.session_token.as_str()),
        (REGION_VAR, region),
    ]
    .iter()
    .map(|(name, value)| format!("export {name}={value}\n"))
    .collect()
}

/// Replace the environment file at `path` with the exported credentials
pub async fn write(path: &Path, creds: &Credentials, region: &str) -> Result<()> {
    super::write_private(path, &render(creds, region)).await?;
    info!("Credentials written to {}", path.display());
    Ok(())
}
