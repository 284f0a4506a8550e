use std::{io, process::ExitStatus};

use thiserror::Error;

pub mod credentials;
pub mod sso;

pub use credentials::Credentials;

/// Handle on the external AWS CLI executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCli {
    program: String,
}

impl AwsCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[derive(Debug, Error)]
pub enum AwsCliError {
    #[error("failed to run `{program}`. Is the AWS CLI installed and on PATH?")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`aws sso login` for profile '{profile}' failed ({status})")]
    LoginFailed { profile: String, status: ExitStatus },

    #[error("`aws configure export-credentials` for profile '{profile}' failed ({status}){}", stderr_suffix(.stderr))]
    ExportFailed {
        profile: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("exported credentials for profile '{profile}' are not valid JSON credentials")]
    MalformedCredentials {
        profile: String,
        #[source]
        source: serde_json::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    match stderr.trim() {
        "" => String::new(),
        message => format!(": {message}"),
    }
}
