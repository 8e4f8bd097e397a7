//! Batch crop executor.
//!
//! Each input image is handled independently: resolve its card code,
//! dispatch a crop rectangle, crop, encode, write `<code>.png`. A failure on
//! one image is logged and recorded in the [`BatchSummary`]; the batch keeps
//! going. Only problems that would make every image fail (the output
//! directory cannot be created or written) abort the run, and they do so
//! before any image is touched.
//!
//! Outputs are overwritten, so a batch can simply be re-run.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use thiserror::Error;

use crate::card::CardType;
use crate::config::PipelineConfig;
use crate::decode::{decode_image, DecodeError};
use crate::dispatch::{card_code, dispatch, CropBoxes, CropLayout};
use crate::encode::{encode_png, EncodeError};
use crate::metadata::MetadataIndex;
use crate::transform::{apply_crop, CropRect};

const WRITE_CHECK_FILE: &str = ".portrait-write-check";

/// Errors that abort a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output directory {} is not writable: {source}", path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output directory {} is the input directory", path.display())]
    OutputIsInput { path: PathBuf },

    #[error("Invalid input pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Errors for a single image. Logged and counted, never fatal.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("No card code in file name")]
    NoCardCode,

    #[error("Failed to read image: {0}")]
    Read(#[source] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An image that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFailure {
    pub path: PathBuf,
    pub error: String,
}

/// A portrait written by the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait {
    pub code: String,
    pub card_type: CardType,
    pub layout: CropLayout,
    pub output: PathBuf,
}

/// Counts reported after a crop batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    /// Images discovered in the input directory.
    pub found: usize,
    /// Portraits written.
    pub processed: usize,
    pub failures: Vec<AssetFailure>,
    pub by_type: BTreeMap<CardType, usize>,
    pub by_layout: BTreeMap<CropLayout, usize>,
}

impl BatchSummary {
    fn new(output_dir: &Path, found: usize) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            found,
            ..Self::default()
        }
    }

    fn record(&mut self, portrait: &Portrait) {
        self.processed += 1;
        *self.by_type.entry(portrait.card_type).or_default() += 1;
        *self.by_layout.entry(portrait.layout).or_default() += 1;
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} images to process.", self.found)?;
        writeln!(
            f,
            "Successfully created {} portraits in {}.",
            self.processed,
            self.output_dir.display()
        )?;
        for (layout, count) in &self.by_layout {
            writeln!(f, "  {layout} box: {count}")?;
        }
        for (card_type, count) in &self.by_type {
            writeln!(f, "  {card_type}: {count}")?;
        }
        write!(f, "Failed: {}", self.failed())?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.path.display(), failure.error)?;
        }
        Ok(())
    }
}

/// Create `dir` if needed and make sure files can be written into it.
///
/// # Errors
///
/// Returns [`BatchError::OutputDir`] or [`BatchError::OutputNotWritable`].
pub fn prepare_output_dir(dir: &Path) -> Result<(), BatchError> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|source| BatchError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %dir.display(), "created output directory");
    }

    let check = dir.join(WRITE_CHECK_FILE);
    fs::write(&check, b"")
        .and_then(|()| fs::remove_file(&check))
        .map_err(|source| BatchError::OutputNotWritable {
            path: dir.to_path_buf(),
            source,
        })
}

/// List images in `dir` whose extension is one of `extensions`
/// (case-insensitive), sorted and without duplicates.
///
/// # Errors
///
/// Returns [`BatchError::Pattern`] if an extension produces an invalid
/// glob pattern.
pub fn discover_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        tracing::warn!(path = %dir.display(), "input directory does not exist");
        return Ok(Vec::new());
    }

    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let base = glob::Pattern::escape(&dir.to_string_lossy());

    let mut paths = Vec::new();
    for extension in extensions {
        let extension = extension.trim_start_matches('.');
        let pattern = format!("{base}/*.{extension}");
        let entries = glob::glob_with(&pattern, options)
            .map_err(|source| BatchError::Pattern { pattern, source })?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "skipping unreadable entry"),
            }
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Where the portrait for `code` is written.
pub fn output_path(output_dir: &Path, code: &str) -> PathBuf {
    output_dir.join(format!("{code}.png"))
}

/// Crop one image file to `rect` and write it as PNG to `output`,
/// replacing any existing file.
///
/// Returns the dimensions of the written image.
///
/// # Errors
///
/// Returns [`AssetError`] if the image cannot be read, decoded, encoded, or
/// written.
pub fn crop_file(input: &Path, output: &Path, rect: CropRect) -> Result<(u32, u32), AssetError> {
    let bytes = fs::read(input).map_err(AssetError::Read)?;
    let image = decode_image(&bytes)?;

    if !rect.fits_within(image.width(), image.height()) {
        tracing::warn!(
            path = %input.display(),
            width = image.width(),
            height = image.height(),
            "crop box extends past the image; padding with transparency"
        );
    }

    let portrait = apply_crop(&image, rect);
    let encoded = encode_png(&portrait)?;
    fs::write(output, encoded).map_err(|source| AssetError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    Ok((portrait.width(), portrait.height()))
}

/// Dispatch and crop a single card image.
///
/// # Errors
///
/// Returns [`AssetError::NoCardCode`] if the file name carries no card code,
/// or any error from [`crop_file`].
pub fn process_asset(
    input: &Path,
    output_dir: &Path,
    index: &MetadataIndex,
    boxes: &CropBoxes,
) -> Result<Portrait, AssetError> {
    let code = card_code(input).ok_or(AssetError::NoCardCode)?;
    let selected = dispatch(code, index, boxes);
    let output = output_path(output_dir, code);

    crop_file(input, &output, selected.rect)?;
    tracing::debug!(
        %code,
        card_type = %selected.card_type,
        layout = %selected.layout,
        output = %output.display(),
        "wrote portrait"
    );

    Ok(Portrait {
        code: code.to_string(),
        card_type: selected.card_type,
        layout: selected.layout,
        output,
    })
}

/// Fail if `output_dir` resolves to the same directory as `input_dir`.
///
/// Portraits share the `<code>.png` names of their sources, so writing them
/// in place would replace each card with its crop. A missing input directory
/// cannot collide with anything.
fn ensure_distinct_dirs(input_dir: &Path, output_dir: &Path) -> Result<(), BatchError> {
    let (Ok(input), Ok(output)) = (fs::canonicalize(input_dir), fs::canonicalize(output_dir)) else {
        return Ok(());
    };
    if input == output {
        return Err(BatchError::OutputIsInput { path: output });
    }
    Ok(())
}

/// Crop every image in `config.input_dir` into `config.output_dir`.
///
/// # Errors
///
/// Only [`BatchError`]s are returned; per-image failures end up in
/// [`BatchSummary::failures`].
pub fn run_batch(config: &PipelineConfig, index: &MetadataIndex) -> Result<BatchSummary, BatchError> {
    prepare_output_dir(&config.output_dir)?;
    ensure_distinct_dirs(&config.input_dir, &config.output_dir)?;
    let assets = discover_images(&config.input_dir, &config.extensions)?;
    tracing::info!(
        count = assets.len(),
        input = %config.input_dir.display(),
        "found images to process"
    );

    let mut summary = BatchSummary::new(&config.output_dir, assets.len());
    for path in &assets {
        match process_asset(path, &config.output_dir, index, &config.crop_boxes) {
            Ok(portrait) => {
                summary.record(&portrait);
                log_progress(summary.processed, assets.len(), config.progress_interval);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to process image");
                summary.failures.push(AssetFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        processed = summary.processed,
        failed = summary.failed(),
        "batch complete"
    );
    Ok(summary)
}

/// Whether `done` successful images is a progress milestone.
pub(crate) fn progress_due(done: usize, interval: usize) -> bool {
    interval > 0 && done > 0 && done % interval == 0
}

/// Log progress after a success; `done` counts successes only.
pub(crate) fn log_progress(done: usize, total: usize, interval: usize) {
    if progress_due(done, interval) {
        tracing::info!("Processed {done}/{total} images...");
    }
}
