use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::Path;

use crate::{
    config::{self, ConfigError, Settings},
    constants::{DEFAULT_AWS_CLI, DEFAULT_AWS_REGION, DEFAULT_ENV_FILE, DEFAULT_FUNCTION_FILE},
};

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigureCommand {}

impl ConfigureCommand {
    pub async fn execute(self, config_path: &Path, profile: Option<&str>) -> Result<()> {
        println!("Configuring aws-sso-env in {}", config_path.display());

        let existing = match config::read_settings(config_path).await {
            Ok(settings) => {
                println!("Press Enter to keep current values, or type new values.");
                Some(settings)
            }
            Err(ConfigError::MissingSource(_)) => None,
            Err(e) => return Err(e.into()),
        };
        println!();

        let defaults = prompt_defaults(existing, profile);
        let theme = ColorfulTheme::default();

        let profile = Input::<String>::with_theme(&theme)
            .with_prompt("AWS profile")
            .with_initial_text(defaults.profile.clone().unwrap_or_default())
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("AWS profile is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .context("Failed to read AWS profile")?;

        let env_file = prompt(&theme, "Credentials environment file", defaults.env_file)?;
        let function_file = prompt(&theme, "Shell functions file", defaults.function_file)?;
        let region = prompt(&theme, "AWS region", defaults.region)?;

        let settings = Settings {
            profile: Some(profile.trim().to_string()),
            env_file: Some(env_file),
            function_file: Some(function_file),
            region: Some(region),
            aws_cli: defaults.aws_cli,
        };

        config::save(config_path, &settings).await?;

        println!("\nConfiguration saved to {}.", config_path.display());
        Ok(())
    }
}

fn prompt(theme: &ColorfulTheme, label: &str, default: Option<String>) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(label)
        .default(default.unwrap_or_default())
        .interact_text()
        .with_context(|| format!("Failed to read {label}"))
}

/// Values offered at each prompt: the `--profile` flag, then the existing file, then built-in defaults
fn prompt_defaults(existing: Option<Settings>, profile: Option<&str>) -> Settings {
    let existing = existing.unwrap_or_default();

    Settings {
        profile: profile.map(str::to_string).or(existing.profile),
        env_file: existing
            .env_file
            .or_else(|| Some(DEFAULT_ENV_FILE.to_string())),
        function_file: existing
            .function_file
            .or_else(|| Some(DEFAULT_FUNCTION_FILE.to_string())),
        region: existing
            .region
            .or_else(|| Some(DEFAULT_AWS_REGION.to_string())),
        // Not prompted for; kept only if already configured
        aws_cli: existing.aws_cli.filter(|cli| cli != DEFAULT_AWS_CLI),
    }
}
