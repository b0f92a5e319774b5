//! Mock prober for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{Prober, Title, ToolError};

/// Mock implementation of the Prober trait.
///
/// Provides controllable behavior for testing:
/// - Configure titles per path (unknown paths report their file stem)
/// - Record every probed path for assertions
/// - Simulate failures for specific paths or the next call
///
/// Clones share state, so a test can keep one handle while the planner owns another.
///
/// # Example
///
/// ```rust,ignore
/// use aaxconv_core::testing::MockProber;
///
/// let prober = MockProber::new();
/// prober.set_title("/books/dune.m4b", Title::new("Dune")).await;
///
/// let catalog = build_catalog(&prober, Path::new("/books"), ".m4b").await?;
/// assert_eq!(prober.probe_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockProber {
    /// Pre-configured titles by path.
    titles: Arc<RwLock<HashMap<PathBuf, Title>>>,
    /// Paths probed so far, in call order.
    probed: Arc<RwLock<Vec<PathBuf>>>,
    /// Paths whose probe fails with a non-zero exit.
    failing: Arc<RwLock<HashSet<PathBuf>>>,
    /// If set, the next probe will fail with this error.
    next_error: Arc<RwLock<Option<ToolError>>>,
}

impl MockProber {
    /// Create a new mock prober.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title reported for a specific path.
    pub async fn set_title(&self, path: impl AsRef<Path>, title: Title) {
        self.titles
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), title);
    }

    /// Make every probe of `path` fail.
    pub async fn fail_on(&self, path: impl AsRef<Path>) {
        self.failing
            .write()
            .await
            .insert(path.as_ref().to_path_buf());
    }

    /// Configure the next probe to fail with the given error.
    pub async fn set_next_error(&self, error: ToolError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all probed paths, in call order.
    pub async fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.read().await.clone()
    }

    /// Get the number of probes performed.
    pub async fn probe_count(&self) -> usize {
        self.probed.read().await.len()
    }
}

#[async_trait]
impl Prober for MockProber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe_title(&self, path: &Path) -> Result<Title, ToolError> {
        self.probed.write().await.push(path.to_path_buf());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        if self.failing.read().await.contains(path) {
            return Err(ToolError::failed(
                "mock",
                Some(1),
                Some(format!("{}: Invalid data found when processing input", path.display())),
            ));
        }

        if let Some(title) = self.titles.read().await.get(path) {
            return Ok(title.clone());
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Title::new(stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_title_is_stem() {
        let prober = MockProber::new();
        let title = prober.probe_title(Path::new("/in/dune.aax")).await.unwrap();
        assert_eq!(title.as_str(), "dune");
    }

    #[tokio::test]
    async fn test_configured_title_and_recording() {
        let prober = MockProber::new();
        prober.set_title("/in/a.aax", Title::new("Emma")).await;

        let shared = prober.clone();
        assert_eq!(
            shared.probe_title(Path::new("/in/a.aax")).await.unwrap().as_str(),
            "Emma"
        );
        assert_eq!(prober.probed_paths().await, vec![PathBuf::from("/in/a.aax")]);
    }

    #[tokio::test]
    async fn test_error_injection() {
        let prober = MockProber::new();
        prober
            .set_next_error(ToolError::Timeout {
                tool: "mock".to_string(),
                timeout_secs: 1,
            })
            .await;
        prober.fail_on("/in/bad.aax").await;

        assert!(matches!(
            prober.probe_title(Path::new("/in/ok.aax")).await,
            Err(ToolError::Timeout { .. })
        ));
        assert!(prober.probe_title(Path::new("/in/ok.aax")).await.is_ok());
        assert!(matches!(
            prober.probe_title(Path::new("/in/bad.aax")).await,
            Err(ToolError::Failed { .. })
        ));
        assert_eq!(prober.probe_count().await, 3);
    }
}
