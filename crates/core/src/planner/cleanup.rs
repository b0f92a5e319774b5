//! Input file cleanup.

use std::path::Path;
use tracing::{info, warn};

use super::error::PlannerError;

/// Delete `path` when cleanup is enabled.
///
/// Returns whether the file was removed. A disabled cleanup is not an error,
/// only a warning.
pub async fn cleanup_input(path: &Path, enabled: bool) -> Result<bool, PlannerError> {
    if !enabled {
        warn!(
            "Configuration 'input.cleanup: false' blocked cleanup of {:?}. Set 'input.cleanup: true' to clean up input files.",
            path
        );
        return Ok(false);
    }

    tokio::fs::remove_file(path)
        .await
        .map_err(|source| PlannerError::Cleanup {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Cleaned up {:?}", path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cleanup_enabled_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.aax");
        std::fs::write(&path, b"x").unwrap();

        assert!(cleanup_input(&path, true).await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_disabled_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.aax");
        std::fs::write(&path, b"x").unwrap();

        assert!(!cleanup_input(&path, false).await.unwrap());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let result = cleanup_input(&dir.path().join("gone.aax"), true).await;
        assert!(matches!(result, Err(PlannerError::Cleanup { .. })));
    }
}
