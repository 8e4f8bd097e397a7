//! JPEG to PNG pre-conversion.
//!
//! Card images fetched from some sources arrive as JPEG. The crop pipeline
//! writes PNG portraits from any input format, but the game client expects
//! the full card images as PNG too, so this pass converts them in bulk.
//! EXIF orientation is baked into the written pixels.

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{
    discover_images, log_progress, prepare_output_dir, AssetError, AssetFailure, BatchError,
};
use crate::decode::decode_jpeg;
use crate::encode::encode_png;

/// Extensions picked up by the conversion pass.
pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Counts reported after a conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub found: usize,
    pub converted: usize,
    pub failures: Vec<AssetFailure>,
}

impl ConvertSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Convert one JPEG file to a PNG at `output`, replacing any existing file.
///
/// # Errors
///
/// Returns [`AssetError`] if the file cannot be read, decoded, encoded, or
/// written.
pub fn convert_file(input: &Path, output: &Path) -> Result<(), AssetError> {
    let bytes = fs::read(input).map_err(AssetError::Read)?;
    let image = decode_jpeg(&bytes)?;
    let encoded = encode_png(&image)?;
    fs::write(output, encoded).map_err(|source| AssetError::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// Convert every JPEG in `input_dir` into `<stem>.png` in `output_dir`.
///
/// # Errors
///
/// Only [`BatchError`]s are returned; per-file failures are recorded in
/// [`ConvertSummary::failures`].
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    progress_interval: usize,
) -> Result<ConvertSummary, BatchError> {
    prepare_output_dir(output_dir)?;
    let extensions: Vec<String> = JPEG_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    let sources = discover_images(input_dir, &extensions)?;
    tracing::info!(count = sources.len(), input = %input_dir.display(), "found JPEG images");

    let mut summary = ConvertSummary {
        found: sources.len(),
        ..ConvertSummary::default()
    };

    for path in &sources {
        let output = png_path(output_dir, path);
        match convert_file(path, &output) {
            Ok(()) => {
                tracing::debug!(input = %path.display(), output = %output.display(), "converted");
                summary.converted += 1;
                log_progress(summary.converted, sources.len(), progress_interval);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to convert image");
                summary.failures.push(AssetFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

fn png_path(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".png");
    output_dir.join(name)
}
