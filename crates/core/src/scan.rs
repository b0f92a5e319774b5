//! Directory listing for candidate inputs and converted outputs.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use walkdir::WalkDir;

use crate::converter::MediaFile;

#[derive(Debug, Error)]
#[error("Failed to list {path}: {source}")]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl ScanError {
    fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Regular files directly inside `dir` whose name ends with `extension`
/// (ASCII case-insensitive), sorted by path.
pub async fn list_candidates(dir: &Path, extension: &str) -> Result<Vec<MediaFile>, ScanError> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await.map_err(|e| ScanError::new(dir, e))?;

    while let Some(entry) = entries.next_entry().await.map_err(|e| ScanError::new(dir, e))? {
        let path = entry.path();
        if MediaFile::has_suffix(&path, extension) && is_file(&path).await? {
            files.push(MediaFile::new(path));
        }
    }

    files.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(files)
}

/// Regular files anywhere under `dir` whose name ends with `extension`
/// (ASCII case-insensitive), sorted by path.
///
/// Symlinks are not followed. A missing `dir` means nothing was converted
/// yet and yields no files.
pub async fn list_converted(dir: &Path, extension: &str) -> Result<Vec<MediaFile>, ScanError> {
    if !fs::try_exists(dir).await.map_err(|e| ScanError::new(dir, e))? {
        return Ok(Vec::new());
    }

    let root = dir.to_path_buf();
    let extension = extension.to_string();
    tokio::task::spawn_blocking(move || walk_converted(&root, &extension))
        .await
        .map_err(|e| ScanError::new(dir, std::io::Error::other(e)))?
}

fn walk_converted(dir: &Path, extension: &str) -> Result<Vec<MediaFile>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            ScanError::new(&path, source)
        })?;
        if entry.file_type().is_file() && MediaFile::has_suffix(entry.path(), extension) {
            files.push(MediaFile::new(entry.into_path()));
        }
    }

    files.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(files)
}

async fn is_file(path: &Path) -> Result<bool, ScanError> {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .map_err(|e| ScanError::new(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(files: &[MediaFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path().file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_list_candidates_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.aax"), b"b").unwrap();
        std::fs::write(dir.path().join("a.AAX"), b"a").unwrap();
        std::fs::write(dir.path().join("c.m4b"), b"c").unwrap();
        std::fs::create_dir(dir.path().join("folder.aax")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("d.aax"), b"d").unwrap();

        let files = list_candidates(dir.path(), ".aax").await.unwrap();
        assert_eq!(names(&files), vec!["a.AAX", "b.aax"]);
    }

    #[tokio::test]
    async fn test_list_candidates_missing_dir_fails() {
        let result = list_candidates(Path::new("/nonexistent/input"), ".aax").await;
        let err = result.unwrap_err();
        assert_eq!(err.path, PathBuf::from("/nonexistent/input"));
    }

    #[tokio::test]
    async fn test_list_converted_is_recursive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("top.m4b"), b"").unwrap();
        std::fs::create_dir_all(dir.path().join("author").join("series")).unwrap();
        std::fs::write(dir.path().join("author").join("series").join("deep.M4B"), b"").unwrap();
        std::fs::write(dir.path().join("author").join("cover.jpg"), b"").unwrap();

        let files = list_converted(dir.path(), ".m4b").await.unwrap();
        assert_eq!(names(&files), vec!["deep.M4B", "top.m4b"]);
    }

    #[tokio::test]
    async fn test_list_converted_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = list_converted(&dir.path().join("not-yet"), ".m4b")
            .await
            .unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_converted_ignores_symlink_loop() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.m4b"), b"").unwrap();
        std::os::unix::fs::symlink(".", dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink("a.m4b", dir.path().join("link.m4b")).unwrap();

        let files = list_converted(dir.path(), ".m4b").await.unwrap();
        assert_eq!(names(&files), vec!["a.m4b"]);
    }
}
