//! The conversion planner.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::catalog::{build_catalog, Catalog};
use crate::config::DuplicatePolicy;
use crate::converter::{ConversionCommand, MediaFile, Prober, Transcoder};
use crate::scan::list_candidates;
use crate::secrets::ActivationBytes;

use super::cleanup::cleanup_input;
use super::config::PlannerSettings;
use super::error::PlannerError;
use super::types::{Outcome, ReportEntry, RunReport};
use super::verify::verify_output;

/// Decides, for each candidate input, whether to skip, convert or stop the run.
///
/// Candidates are handled one at a time, in listing order. The catalog is
/// read-only for the whole run.
pub struct ConversionPlanner<P: Prober, T: Transcoder> {
    settings: PlannerSettings,
    prober: P,
    transcoder: T,
    activation_bytes: ActivationBytes,
}

impl<P: Prober, T: Transcoder> ConversionPlanner<P, T> {
    pub fn new(
        settings: PlannerSettings,
        prober: P,
        transcoder: T,
        activation_bytes: ActivationBytes,
    ) -> Self {
        Self {
            settings,
            prober,
            transcoder,
            activation_bytes,
        }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Where `file` gets converted to.
    pub fn output_path_for(&self, file: &MediaFile) -> PathBuf {
        file.output_path(&self.settings.output_dir, &self.settings.output_extension)
    }

    /// Full run: list candidates, build the catalog, process every candidate.
    ///
    /// With no candidates no tool is invoked at all.
    pub async fn run(&self) -> Result<RunReport, PlannerError> {
        let candidates =
            list_candidates(&self.settings.input_dir, &self.settings.input_extension).await?;
        debug!("Found files: {:?}", candidates);
        info!("Found {} file(s) to convert", candidates.len());

        if candidates.is_empty() {
            let mut report = RunReport::new(0);
            report.finish();
            return Ok(report);
        }

        let catalog = build_catalog(
            &self.prober,
            &self.settings.output_dir,
            &self.settings.output_extension,
        )
        .await?;

        self.process_candidates(&candidates, &catalog).await
    }

    /// Process `candidates` in order against a fixed catalog.
    pub async fn process_candidates(
        &self,
        candidates: &[MediaFile],
        catalog: &Catalog,
    ) -> Result<RunReport, PlannerError> {
        let mut report = RunReport::new(candidates.len());
        report.catalogued = catalog.len();

        for (position, file) in candidates.iter().enumerate() {
            let entry = self.process_file(file, catalog).await?;
            let stop = matches!(entry.outcome, Outcome::SkippedDuplicate { .. })
                && self.settings.on_duplicate == DuplicatePolicy::Abort;
            report.record(entry);

            if stop {
                warn!(
                    "Duplicate {} stops the run, {} remaining file(s) not processed. Set 'input.on_duplicate: skip' to continue past duplicates.",
                    file,
                    candidates.len() - position - 1
                );
                report.aborted_by = Some(file.path().to_path_buf());
                break;
            }
        }

        report.finish();
        Ok(report)
    }

    /// Decide and act on a single candidate.
    pub async fn process_file(
        &self,
        file: &MediaFile,
        catalog: &Catalog,
    ) -> Result<ReportEntry, PlannerError> {
        info!("Preparing to convert {}", file);

        let title = self
            .prober
            .probe_title(file.path())
            .await
            .map_err(|source| PlannerError::Probe {
                path: file.path().to_path_buf(),
                source,
            })?;
        let output = self.output_path_for(file);
        debug!("Input: {} ({:?})", file, title.as_str());
        debug!("Output: {:?}", output);

        let entry = |outcome| ReportEntry {
            file: file.clone(),
            title: title.clone(),
            output: output.clone(),
            outcome,
        };

        if !self.settings.conversion_enabled {
            warn!(
                "Configuration 'ffmpeg.run: false' has blocked conversion of {}. Set 'ffmpeg.run: true' to convert input files.",
                file
            );
            return Ok(entry(Outcome::SkippedDisabled));
        }

        let duplicate = catalog.contains(&title);
        if duplicate && !self.settings.overwrite {
            warn!(
                "Title {:?} of {} was already converted. Set 'output.overwrite: true' to convert it again.",
                title.as_str(),
                file
            );
            let cleaned_up = cleanup_input(file.path(), self.settings.cleanup).await?;
            return Ok(entry(Outcome::SkippedDuplicate { cleaned_up }));
        }

        let exists = tokio::fs::try_exists(&output)
            .await
            .map_err(|source| PlannerError::Filesystem {
                path: output.clone(),
                source,
            })?;
        if exists && !self.settings.overwrite {
            warn!(
                "Detected converted file {:?}, skipping conversion. Set 'output.overwrite: true' to overwrite previously converted files.",
                output
            );
            return Ok(entry(Outcome::SkippedExisting));
        }
        if duplicate || exists {
            debug!("Configuration 'output.overwrite: true', converting {} again", file);
        }

        let command = ConversionCommand::build(
            &self.settings.ffmpeg,
            &self.activation_bytes,
            file.path(),
            &output,
        );
        debug!("Conversion command: {}", command);

        info!("Converting {}", file);
        self.transcoder
            .transcode(&command)
            .await
            .map_err(|source| PlannerError::Transcode {
                path: file.path().to_path_buf(),
                source,
            })?;

        if let Some(tolerance) = self.settings.verify_tolerance {
            verify_output(file.path(), &output, tolerance)
                .await
                .map_err(|source| PlannerError::Transcode {
                    path: file.path().to_path_buf(),
                    source,
                })?;
        }
        info!("Successfully converted {} to {:?}", file, output);

        let cleaned_up = cleanup_input(file.path(), self.settings.cleanup).await?;
        Ok(entry(Outcome::Converted { cleaned_up }))
    }
}
