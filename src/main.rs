use std::{io, process::ExitCode};

use aws_sso_env::{
    cli::{Cli, exit_code},
    logging,
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let result = cli.execute().await;
    ExitCode::from(exit_code(result, &mut io::stderr()))
}
