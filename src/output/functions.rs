use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::env_file::{ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR, SESSION_TOKEN_VAR};
use crate::constants::ACCESS_KEY_PREVIEW_LEN;

/// Render the helper functions for loading, checking and clearing credentials
pub fn render(env_file: &Path, function_file: &Path) -> String {
    let env_file = shell_quote(&env_file.to_string_lossy());
    let function_file = shell_quote(&function_file.to_string_lossy());

    format!(
        r#"# Generated by aws-sso-env. Load these helpers with:
#   source {function_file}

aws-load-creds() {{
    if [ ! -f {env_file} ]; then
        echo "No credentials file at "{env_file}". Run aws-sso-env first." >&2
        return 1
    fi
    . {env_file}
    echo "AWS credentials loaded from "{env_file}
}}

aws-check-creds() {{
    if [ -z "${ACCESS_KEY_ID_VAR}" ]; then
        echo "No AWS credentials loaded. Run aws-load-creds first." >&2
        return 1
    fi
    echo "Access key: $(printf '%s' "${ACCESS_KEY_ID_VAR}" | cut -c1-{ACCESS_KEY_PREVIEW_LEN})..."
    aws sts get-caller-identity
}}

aws-clear-creds() {{
    unset {ACCESS_KEY_ID_VAR} {SECRET_ACCESS_KEY_VAR} {SESSION_TOKEN_VAR}
    echo "AWS credentials cleared from this shell"
}}
"#
    )
}

/// Replace the shell function file, pointing its helpers at `env_file`
pub async fn write(env_file: &Path, function_file: &Path) -> Result<()> {
    super::write_private(function_file, &render(env_file, function_file)).await?;
    info!("Shell functions written to {}", function_file.display());
    Ok(())
}

/// Single-quote `value` for POSIX shells
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("/home/me/.aws-env"), "'/home/me/.aws-env'");
        assert_eq!(shell_quote("/tmp/it's here"), r"'/tmp/it'\''s here'");
    }

    #[test]
    fn test_render_defines_helpers() {
        let rendered = render(
            &PathBuf::from("/home/me/.aws-env"),
            &PathBuf::from("/home/me/.aws-functions"),
        );

        assert!(rendered.contains("aws-load-creds() {"));
        assert!(rendered.contains("aws-check-creds() {"));
        assert!(rendered.contains("aws-clear-creds() {"));
        assert!(rendered.contains(". '/home/me/.aws-env'"));
        assert!(rendered.contains("#   source '/home/me/.aws-functions'"));
        assert!(rendered.contains("cut -c1-8"));
        assert!(rendered.contains("aws sts get-caller-identity"));
        assert!(rendered.contains("unset AWS_ACCESS_KEY_ID AWS_SECRET_ACCESS_KEY AWS_SESSION_TOKEN"));
        assert!(rendered.contains("\"$AWS_ACCESS_KEY_ID\""));
    }

    #[tokio::test]
    async fn test_write_private_file() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".aws-env");
        let function_file = dir.path().join("shell").join(".aws-functions");

        write(&env_file, &function_file).await.unwrap();

        let contents = std::fs::read_to_string(&function_file).unwrap();
        assert_eq!(contents, render(&env_file, &function_file));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&function_file).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[tokio::test]
    async fn test_regenerate_replaces_paths() {
        let dir = TempDir::new().unwrap();
        let function_file = dir.path().join(".aws-functions");

        write(&dir.path().join("old-env"), &function_file)
            .await
            .unwrap();
        write(&dir.path().join("new-env"), &function_file)
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&function_file).unwrap();
        assert!(contents.contains("new-env"));
        assert!(!contents.contains("old-env"));
    }
}
