use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::{
    aws::AwsCli,
    config::Config,
    output::{env_file, functions},
};

/// What a successful refresh left on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub env_file: PathBuf,
    pub function_file: Option<PathBuf>,
    pub expiration: Option<String>,
}

/// Log in, export the session credentials and write them out.
///
/// Each step only runs if the previous one succeeded, so a failed login or
/// export leaves an existing environment file as it was.
pub async fn refresh(config: &Config, aws: &AwsCli, emit_functions: bool) -> Result<RefreshReport> {
    info!("Refreshing credentials for profile: {}", config.profile);

    aws.login(&config.profile)
        .await
        .context("Failed to log in with AWS SSO")?;

    let credentials = aws
        .export_credentials(&config.profile)
        .await
        .context("Failed to get credentials")?;

    env_file::write(&config.env_file, &credentials, &config.region)
        .await
        .context("Failed to save credentials")?;

    let function_file = if emit_functions {
        functions::write(&config.env_file, &config.function_file)
            .await
            .context("Failed to write shell functions")?;
        Some(config.function_file.clone())
    } else {
        None
    };

    Ok(RefreshReport {
        env_file: config.env_file.clone(),
        function_file,
        expiration: credentials.expiration,
    })
}
