//! Catalog of titles already present in the output directory.
//!
//! The catalog is built once per run, before any conversion, and is never
//! updated afterwards: a book converted during the run is not added back.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::converter::{Prober, Title, ToolError};
use crate::scan::{list_converted, ScanError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Failed to probe converted file {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: ToolError,
    },
}

/// Titles of the converted files found at scan time.
///
/// Keeps the scan order (duplicates included) alongside a lookup index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: Vec<Title>,
    index: HashSet<Title>,
}

impl Catalog {
    pub fn new(titles: Vec<Title>) -> Self {
        let index = titles.iter().cloned().collect();
        Self { titles, index }
    }

    pub fn contains(&self, title: &Title) -> bool {
        self.index.contains(title)
    }

    /// Titles in scan order.
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl FromIterator<Title> for Catalog {
    fn from_iter<I: IntoIterator<Item = Title>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Probe every file under `output_dir` ending with `extension` and collect their titles.
///
/// Any probe failure aborts the build: an incomplete catalog could let a
/// duplicate through.
pub async fn build_catalog<P>(
    prober: &P,
    output_dir: &Path,
    extension: &str,
) -> Result<Catalog, CatalogError>
where
    P: Prober + ?Sized,
{
    let files = list_converted(output_dir, extension).await?;
    debug!(
        "Found {} converted file(s) under {:?}",
        files.len(),
        output_dir
    );

    let mut titles = Vec::with_capacity(files.len());
    for file in files {
        let title = prober
            .probe_title(file.path())
            .await
            .map_err(|source| CatalogError::Probe {
                path: file.path().to_path_buf(),
                source,
            })?;

        if title.is_empty() {
            warn!("Converted file {} has no title metadata", file);
        }
        debug!("Catalogued {:?} from {}", title.as_str(), file);
        titles.push(title);
    }

    let catalog = Catalog::new(titles);
    info!("Catalogued {} converted file(s)", catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProber;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_membership_keeps_duplicates() {
        let catalog: Catalog = ["Dune", "Emma", "Dune"].into_iter().map(Title::new).collect();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(&Title::new("Dune")));
        assert!(!catalog.contains(&Title::new("dune")));
        assert_eq!(catalog.titles()[2].as_str(), "Dune");
    }

    #[tokio::test]
    async fn test_build_catalog_probes_matching_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.m4b"), b"").unwrap();
        std::fs::write(dir.path().join("b.M4B"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let prober = MockProber::new();
        prober
            .set_title(dir.path().join("a.m4b"), Title::new("First Book"))
            .await;
        prober
            .set_title(dir.path().join("b.M4B"), Title::new("Second Book"))
            .await;

        let catalog = build_catalog(&prober, dir.path(), ".m4b").await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&Title::new("First Book")));
        assert!(catalog.contains(&Title::new("Second Book")));
        assert_eq!(prober.probe_count().await, 2);
    }

    #[tokio::test]
    async fn test_build_catalog_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let prober = MockProber::new();

        let catalog = build_catalog(&prober, &dir.path().join("missing"), ".m4b")
            .await
            .unwrap();
        assert!(catalog.is_empty());
        assert_eq!(prober.probe_count().await, 0);
    }

    #[tokio::test]
    async fn test_build_catalog_probe_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.m4b"), b"").unwrap();

        let prober = MockProber::new();
        prober.fail_on(dir.path().join("a.m4b")).await;

        let result = build_catalog(&prober, dir.path(), ".m4b").await;
        assert!(matches!(result, Err(CatalogError::Probe { .. })));
    }
}
