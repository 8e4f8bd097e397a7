//! Portrait Core - card portrait pipeline
//!
//! This crate turns full card scans into square portrait thumbnails. It
//! loads card types from external card databases, picks a fixed crop box per
//! card type, and writes the cropped portraits as PNG.
//!
//! # Pipeline
//!
//! 1. [`metadata::load_index`] merges JSON and XML card lists into a
//!    [`MetadataIndex`] (code → [`CardType`])
//! 2. [`dispatch::dispatch`] picks the wide or narrow [`CropRect`] for a card
//! 3. [`batch::run_batch`] crops every image and reports a [`BatchSummary`]
//!
//! [`convert::convert_directory`] is a separate JPEG → PNG pass for scans
//! that arrive as JPEG.

pub mod batch;
pub mod card;
pub mod config;
pub mod convert;
pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod metadata;
pub mod transform;

pub use batch::{run_batch, AssetError, BatchError, BatchSummary};
pub use card::{CardRecord, CardType};
pub use config::{ConfigError, PipelineConfig};
pub use convert::{convert_directory, ConvertSummary};
pub use dispatch::{dispatch, CropBoxes, CropLayout, NARROW_BOX, WIDE_BOX};
pub use metadata::{load_index, MetadataIndex};
pub use transform::{apply_crop, CropRect};

/// Load metadata and crop every image described by `config`.
///
/// # Errors
///
/// Returns a [`BatchError`] only for problems that affect the whole batch.
pub fn crop_portraits(config: &PipelineConfig) -> Result<BatchSummary, BatchError> {
    let index = load_index(&config.metadata, &config.xml_code_prefix);
    tracing::info!(cards = index.len(), sources = config.metadata.len(), "metadata index ready");
    run_batch(config, &index)
}
