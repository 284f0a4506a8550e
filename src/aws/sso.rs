use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::{AwsCli, AwsCliError, Credentials};

impl AwsCli {
    /// Run `aws sso login` and block until the external flow finishes.
    ///
    /// Stdio is inherited so the CLI can print the verification code and open
    /// the browser. There is no timeout.
    pub async fn login(&self, profile: &str) -> Result<(), AwsCliError> {
        info!("Running SSO login for profile: {}", profile);

        let status = Command::new(&self.program)
            .args(["sso", "login", "--profile", profile])
            .status()
            .await
            .map_err(|source| AwsCliError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(AwsCliError::LoginFailed {
                profile: profile.to_string(),
                status,
            });
        }

        info!("SSO login succeeded");
        Ok(())
    }

    /// Export the session credentials of an authenticated profile
    pub async fn export_credentials(&self, profile: &str) -> Result<Credentials, AwsCliError> {
        info!("Exporting credentials for profile: {}", profile);

        let output = Command::new(&self.program)
            .args(["configure", "export-credentials", "--profile", profile])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| AwsCliError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AwsCliError::ExportFailed {
                profile: profile.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let credentials =
            Credentials::from_json(&stdout).map_err(|source| AwsCliError::MalformedCredentials {
                profile: profile.to_string(),
                source,
            })?;

        debug!("Exported credentials: {:?}", credentials);
        Ok(credentials)
    }
}
