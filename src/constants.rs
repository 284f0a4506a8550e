/// Default configuration file, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".env";

/// Environment variable that points at an alternative configuration file
pub const CONFIG_FILE_ENV: &str = "AWS_SSO_ENV_CONFIG";

/// Configuration key holding the AWS profile name (required)
pub const KEY_PROFILE: &str = "AWS_PROFILE";

/// Configuration key holding the environment file path
pub const KEY_ENV_FILE: &str = "AWS_ENV_FILE";

/// Configuration key holding the shell function file path
pub const KEY_FUNCTION_FILE: &str = "AWS_FUNCTION_FILE";

/// Configuration key holding the region written to the environment file
pub const KEY_REGION: &str = "AWS_REGION";

/// Configuration key holding the AWS CLI executable
pub const KEY_AWS_CLI: &str = "AWS_CLI";

/// Default environment file path (expanded at load time)
pub const DEFAULT_ENV_FILE: &str = "~/.aws-env";

/// Default shell function file path (expanded at load time)
pub const DEFAULT_FUNCTION_FILE: &str = "~/.aws-functions";

/// Default AWS region written alongside the exported credentials
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default AWS CLI executable, looked up on PATH
pub const DEFAULT_AWS_CLI: &str = "aws";

/// Permission bits applied to every file this tool writes
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Number of access key characters shown when a key is displayed
pub const ACCESS_KEY_PREVIEW_LEN: usize = 8;
