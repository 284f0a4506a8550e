use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::{io::Write, path::PathBuf};

use crate::{
    commands::{CompletionsCommand, ConfigureCommand, FunctionsCommand, LoginCommand},
    constants::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "aws-sso-env", version, about = "Log in with AWS SSO and export credentials to a shell-sourceable file", long_about = None)]
pub struct Cli {
    #[arg(
        short = 'c',
        long,
        global = true,
        env = CONFIG_FILE_ENV,
        default_value = DEFAULT_CONFIG_FILE,
        help = "Configuration file with AWS_PROFILE and output paths"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'p',
        long,
        global = true,
        help = "AWS profile name (overrides AWS_PROFILE from the configuration file)"
    )]
    pub profile: Option<String>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Log in with AWS SSO and write the credentials file (default)")]
    Login(LoginCommand),
    #[command(about = "Regenerate the shell helper functions file")]
    Functions(FunctionsCommand),
    #[command(about = "Create or update the configuration file interactively")]
    Configure(ConfigureCommand),
    #[command(about = "Generate shell completion scripts for aws-sso-env")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let profile = self.profile.as_deref();
        let command = self.command.unwrap_or_default();

        match command {
            Commands::Login(cmd) => cmd.execute(&self.config, profile).await,
            Commands::Functions(cmd) => cmd.execute(&self.config).await,
            Commands::Configure(cmd) => cmd.execute(&self.config, profile).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}

/// Map the outcome of [`Cli::execute`] to a process exit code, printing the
/// error chain to `stderr` on failure
pub fn exit_code(result: Result<()>, stderr: &mut dyn Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            // Nothing left to report to if stderr itself is gone
            let _ = writeln!(stderr, "Error: {e:#}");
            1
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self::Login(LoginCommand::default())
    }
}
