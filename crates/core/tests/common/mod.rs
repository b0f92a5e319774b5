//! Shared fixture for planner integration tests.
//!
//! Provides an input and an output directory inside one temp dir, plus a
//! planner wired to mock tools that the test keeps handles on.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use aaxconv_core::testing::{fixtures, MockProber, MockTranscoder};
use aaxconv_core::{ConversionPlanner, PlannerSettings, Title};

/// Test fixture for planner runs against real directories.
pub struct TestFixture {
    /// Keeps the temp dir alive for the fixture's lifetime
    _root: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Mock prober - configure titles per path
    pub prober: MockProber,
    /// Mock transcoder - inspect submitted commands
    pub transcoder: MockTranscoder,
}

impl TestFixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let input_dir = root.path().join("input");
        let output_dir = root.path().join("output");
        std::fs::create_dir(&input_dir).unwrap();
        std::fs::create_dir(&output_dir).unwrap();

        Self {
            _root: root,
            input_dir,
            output_dir,
            prober: MockProber::new(),
            transcoder: MockTranscoder::new(),
        }
    }

    /// Default settings: `.aax` to `.m4b`, overwrite and cleanup off, abort on duplicates.
    pub fn settings(&self) -> PlannerSettings {
        fixtures::settings(&self.input_dir, &self.output_dir)
    }

    /// A planner sharing this fixture's mocks.
    pub fn planner(
        &self,
        settings: PlannerSettings,
    ) -> ConversionPlanner<MockProber, MockTranscoder> {
        ConversionPlanner::new(
            settings,
            self.prober.clone(),
            self.transcoder.clone(),
            fixtures::activation_bytes(),
        )
    }

    /// Write an input file whose probe reports `title`.
    pub async fn add_input(&self, name: &str, title: &str) -> PathBuf {
        let path = self.input_dir.join(name);
        std::fs::write(&path, format!("aax:{}", title)).unwrap();
        self.prober.set_title(&path, Title::new(title)).await;
        path
    }

    /// Write an already-converted file whose probe reports `title`.
    pub async fn add_output(&self, name: &str, title: &str) -> PathBuf {
        let path = self.output_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, format!("m4b:{}", title)).unwrap();
        self.prober.set_title(&path, Title::new(title)).await;
        path
    }

    /// Input paths of every transcode submitted so far.
    pub async fn transcoded_inputs(&self) -> Vec<PathBuf> {
        self.transcoder
            .recorded_transcodes()
            .await
            .into_iter()
            .map(|t| t.command.input().to_path_buf())
            .collect()
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}
