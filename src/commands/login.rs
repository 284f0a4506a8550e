use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use tracing::info;

use crate::{
    aws::AwsCli,
    config,
    workflow::{self, RefreshReport},
};

#[derive(Debug, Clone, Default, Args)]
pub struct LoginCommand {
    #[arg(long, help = "Skip writing the shell helper functions file")]
    pub no_functions: bool,
}

impl LoginCommand {
    pub async fn execute(self, config_path: &Path, profile: Option<&str>) -> Result<()> {
        let config = config::load(config_path, profile)
            .await
            .context("Failed to load configuration")?;

        let aws = AwsCli::new(config.aws_cli.clone());
        info!("Using AWS CLI: {}", aws.program());

        let report = workflow::refresh(&config, &aws, !self.no_functions).await?;
        print_report(&report);

        Ok(())
    }
}

fn print_report(report: &RefreshReport) {
    println!("\nCredentials saved to {}", report.env_file.display());
    if let Some(expiration) = &report.expiration {
        println!("Credentials will expire at: {expiration}");
    }

    println!("\nTo use these credentials, run:");
    println!("source {}", report.env_file.display());

    if let Some(function_file) = &report.function_file {
        println!(
            "\nShell helpers (aws-load-creds, aws-check-creds, aws-clear-creds) written to {}",
            function_file.display()
        );
        println!(
            "Add `source {}` to your shell profile to enable them.",
            function_file.display()
        );
    }
}
