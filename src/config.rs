use crate::constants::{
    DEFAULT_AWS_CLI, DEFAULT_AWS_REGION, DEFAULT_ENV_FILE, DEFAULT_FUNCTION_FILE, KEY_AWS_CLI,
    KEY_ENV_FILE, KEY_FUNCTION_FILE, KEY_PROFILE, KEY_REGION,
};
use anyhow::{Context, Result};
use ini::{EscapePolicy, Ini, ParseOption, Properties, WriteOption};
use std::{
    borrow::Cow,
    env, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Resolved settings for a single refresh run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub profile: String,
    pub env_file: PathBuf,
    pub function_file: PathBuf,
    pub region: String,
    pub aws_cli: String,
}

/// Raw values as they appear in the configuration file, before defaults and expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub profile: Option<String>,
    pub env_file: Option<String>,
    pub function_file: Option<String>,
    pub region: Option<String>,
    pub aws_cli: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "configuration file {} not found. Run `aws-sso-env configure` or pass --config",
        .0.display()
    )]
    MissingSource(PathBuf),

    #[error("required setting {key} is missing or blank in {}", .path.display())]
    MissingField { key: &'static str, path: PathBuf },

    #[error("failed to read configuration file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("failed to expand {key} value '{value}': {source}")]
    Expand {
        key: &'static str,
        value: String,
        #[source]
        source: shellexpand::LookupError<env::VarError>,
    },
}

impl Settings {
    fn from_section(section: &Properties) -> Self {
        Self {
            profile: lookup(section, KEY_PROFILE),
            env_file: lookup(section, KEY_ENV_FILE),
            function_file: lookup(section, KEY_FUNCTION_FILE),
            region: lookup(section, KEY_REGION),
            aws_cli: lookup(section, KEY_AWS_CLI),
        }
    }

    fn entries(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (KEY_PROFILE, self.profile.as_deref()),
            (KEY_ENV_FILE, self.env_file.as_deref()),
            (KEY_FUNCTION_FILE, self.function_file.as_deref()),
            (KEY_REGION, self.region.as_deref()),
            (KEY_AWS_CLI, self.aws_cli.as_deref()),
        ]
    }

    /// Apply defaults, the command-line profile override and path expansion.
    pub fn resolve(self, source: &Path, profile_override: Option<&str>) -> Result<Config, ConfigError> {
        let profile = profile_override
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .or_else(|| self.profile.clone())
            .ok_or_else(|| ConfigError::MissingField {
                key: KEY_PROFILE,
                path: source.to_path_buf(),
            })?;

        let (env_file, function_file) = self.output_paths()?;
        let aws_cli = self.aws_cli.as_deref().unwrap_or(DEFAULT_AWS_CLI);

        Ok(Config {
            profile,
            env_file,
            function_file,
            aws_cli: expand(KEY_AWS_CLI, aws_cli)?,
            region: self
                .region
                .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
        })
    }

    /// Expanded environment file and function file paths, defaults applied
    pub fn output_paths(&self) -> Result<(PathBuf, PathBuf), ConfigError> {
        let env_file = self.env_file.as_deref().unwrap_or(DEFAULT_ENV_FILE);
        let function_file = self
            .function_file
            .as_deref()
            .unwrap_or(DEFAULT_FUNCTION_FILE);

        Ok((
            expand(KEY_ENV_FILE, env_file)?.into(),
            expand(KEY_FUNCTION_FILE, function_file)?.into(),
        ))
    }
}

/// Load and validate the configuration file at `path`
pub async fn load(path: &Path, profile_override: Option<&str>) -> Result<Config, ConfigError> {
    let settings = read_settings(path).await?;
    let config = settings.resolve(path, profile_override)?;

    debug!("Loaded configuration from {}", path.display());
    debug!("Profile: {}", config.profile);
    debug!("Environment file: {}", config.env_file.display());
    debug!("Function file: {}", config.function_file.display());

    Ok(config)
}

/// Read the raw settings without applying defaults or validation
pub async fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let ini = read_ini(path).await?;
    Ok(Settings::from_section(ini.general_section()))
}

/// Write `settings` to `path`, keeping any unrelated keys already in the file
pub async fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut ini = match read_ini(path).await {
        Ok(ini) => ini,
        Err(ConfigError::MissingSource(_)) => Ini::new(),
        Err(e) => return Err(e.into()),
    };

    for (key, value) in settings.entries() {
        let Some(value) = value else { continue };

        let section = ini.general_section_mut();
        let existing: Vec<String> = section
            .iter()
            .filter(|(k, _)| normalize_key(k) == key)
            .map(|(k, _)| k.to_string())
            .collect();
        for raw in existing {
            while section.remove(&raw).is_some() {}
        }

        ini.with_general_section().set(key, encode_value(value));
    }

    let options = WriteOption {
        escape_policy: EscapePolicy::Nothing,
        ..WriteOption::default()
    };
    ini.write_to_file_opt(path, options)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

async fn read_ini(path: &Path) -> Result<Ini, ConfigError> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::MissingSource(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    // Values are taken verbatim: backslashes in paths must survive, and
    // quotes and inline comments are handled by `clean_value`.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(&contents, options).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Dotenv files commonly prefix assignments with `export`
fn normalize_key(key: &str) -> &str {
    key.strip_prefix("export ").unwrap_or(key).trim()
}

fn lookup(section: &Properties, key: &str) -> Option<String> {
    section
        .iter()
        .filter(|(k, _)| normalize_key(k) == key)
        .map(|(_, v)| clean_value(v))
        .last()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Dotenv value semantics: the text between matching quotes, or the unquoted
/// text up to a ` #` comment.
fn clean_value(raw: &str) -> &str {
    let value = raw.trim();
    let quoted = ['"', '\''].into_iter().find_map(|q| {
        let rest = value.strip_prefix(q)?;
        rest.find(q).map(|end| &rest[..end])
    });

    quoted.unwrap_or_else(|| strip_inline_comment(value))
}

fn strip_inline_comment(value: &str) -> &str {
    value
        .char_indices()
        .find(|&(i, c)| c == '#' && value[..i].ends_with(char::is_whitespace))
        .map_or(value, |(i, _)| value[..i].trim_end())
}

/// Quote values that would otherwise lose text to `clean_value` on reload
fn encode_value(value: &str) -> String {
    if value.trim() != value || strip_inline_comment(value) != value {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn expand(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let home_dir = || dirs::home_dir().map(|home| home.to_string_lossy().into_owned());
    shellexpand::full_with_context(value, home_dir, |var| env::var(var).map(Some))
        .map(Cow::into_owned)
        .map_err(|source| ConfigError::Expand {
            key,
            value: value.to_string(),
            source,
        })
}
