//! Optional post-conversion output check.
//!
//! A `-c copy` remux keeps the audio stream untouched, so a healthy output
//! is roughly the size of its input. Off unless `output.verify` is set.

use std::path::Path;
use tracing::debug;

use crate::converter::ToolError;

/// Check that `output` exists and its size is within `tolerance` of `input`'s.
pub async fn verify_output(input: &Path, output: &Path, tolerance: f64) -> Result<(), ToolError> {
    let output_size = match tokio::fs::metadata(output).await {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ToolError::verification_failed(
                output,
                "output file was not created",
            ));
        }
        Err(e) => return Err(ToolError::Io(e)),
    };
    let input_size = tokio::fs::metadata(input).await?.len();

    if input_size == 0 {
        return Ok(());
    }

    let deviation = (output_size as f64 - input_size as f64).abs() / input_size as f64;
    debug!(
        "Output {:?} is {} bytes, input {} bytes (deviation {:.3})",
        output, output_size, input_size, deviation
    );

    if deviation > tolerance {
        return Err(ToolError::verification_failed(
            output,
            format!(
                "size {} bytes deviates {:.1}% from input size {} bytes (tolerance {:.1}%)",
                output_size,
                deviation * 100.0,
                input_size,
                tolerance * 100.0
            ),
        ));
    }

    Ok(())
}
