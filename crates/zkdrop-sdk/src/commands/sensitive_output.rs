//! Helpers for writing files that hold note secrets.

use std::path::Path;

use eyre::Context as _;
use tokio::io::AsyncWriteExt as _;
use tracing::debug;

/// Owner read/write only.
#[cfg(unix)]
const SENSITIVE_FILE_MODE: u32 = 0o600;

/// Write a file containing secret material.
///
/// On Unix the file ends up with owner-only permissions, also when it already existed with a
/// wider mode.
///
/// # Errors
/// Returns an error if the file cannot be created, written, flushed, or permission-adjusted.
pub(super) async fn write_sensitive_output(path: &Path, contents: &[u8]) -> eyre::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    options.mode(SENSITIVE_FILE_MODE);

    let mut file = options
        .open(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(contents).await?;
    file.flush().await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;

        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(SENSITIVE_FILE_MODE))
            .await?;
    }

    debug!(file = %path.display(), "Wrote sensitive output");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt as _;

    use super::*;

    #[tokio::test]
    async fn tightens_permissions_of_existing_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("note.json");
        std::fs::write(&path, "old").expect("seed file");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))
            .expect("widen permissions");

        write_sensitive_output(&path, b"new").await.expect("write");

        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, SENSITIVE_FILE_MODE);
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "new");
    }
}
