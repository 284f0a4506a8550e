use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use crate::{config, output::functions};

#[derive(Debug, Clone, Default, Args)]
pub struct FunctionsCommand {}

impl FunctionsCommand {
    /// Only the output paths are needed here, so a missing profile is not an error.
    pub async fn execute(self, config_path: &Path) -> Result<()> {
        let settings = config::read_settings(config_path)
            .await
            .context("Failed to load configuration")?;
        let (env_file, function_file) = settings.output_paths()?;

        functions::write(&env_file, &function_file)
            .await
            .context("Failed to write shell functions")?;

        println!("Shell functions written to {}", function_file.display());
        println!(
            "Add `source {}` to your shell profile to enable them.",
            function_file.display()
        );
        Ok(())
    }
}
