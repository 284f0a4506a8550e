use anyhow::{Context, Result};
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

pub mod env_file;
pub mod functions;

/// Overwrite `path` with `contents` and restrict it to owner read/write.
///
/// Missing parent directories are created. Nothing is appended: the previous
/// contents are truncated.
pub async fn write_private(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(crate::constants::PRIVATE_FILE_MODE);

    let mut file = options
        .open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush()
        .await
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    // `mode` only applies when the file is created
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?
            .permissions();
        permissions.set_mode(crate::constants::PRIVATE_FILE_MODE);
        fs::set_permissions(path, permissions)
            .await
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
