use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

pub const EXPORT_JSON: &str = r#"{"Version":1,"AccessKeyId":"AKIATESTKEY00001","SecretAccessKey":"secret","SessionToken":"tok"}"#;

pub const EXPORT_FAILURE_MESSAGE: &str = "Error loading SSO Token: Token has expired";

const CALL_LOG: &str = "aws-calls.log";

/// Write an executable stand-in for the AWS CLI into `dir`.
///
/// Every invocation appends its arguments to a log next to the script, see [`calls`].
pub fn fake_aws(dir: &Path, login_exit: i32, export_stdout: &str, export_exit: i32) -> PathBuf {
    let log = dir.join(CALL_LOG);
    let script = format!(
        "#!/bin/sh\n\
         echo \"$@\" >> '{log}'\n\
         case \"$1\" in\n\
         sso)\n\
         exit {login_exit}\n\
         ;;\n\
         configure)\n\
         cat <<'EOF'\n\
         {export_stdout}\n\
         EOF\n\
         if [ {export_exit} -ne 0 ]; then echo '{EXPORT_FAILURE_MESSAGE}' >&2; fi\n\
         exit {export_exit}\n\
         ;;\n\
         esac\n\
         exit 64\n",
        log = log.display(),
    );

    let path = dir.join("aws");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Arguments of every fake AWS CLI invocation so far, oldest first
pub fn calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join(CALL_LOG))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
