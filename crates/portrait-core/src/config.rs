//! Pipeline configuration.
//!
//! All settings have defaults matching the asset layout of the game client
//! (`public/cards` in, `public/cardPortraits` out). A JSON file can override
//! any subset of them:
//!
//! ```json
//! {
//!   "input_dir": "public/cards",
//!   "metadata": ["RingsDB/json/Core.json", "sets/core.xml"],
//!   "crop_boxes": { "wide": [134, 10, 424, 300], "narrow": [104, 87, 334, 317] }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::CropBoxes;
use crate::metadata::DEFAULT_CODE_PREFIX;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for a crop run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the full card images.
    pub input_dir: PathBuf,
    /// Directory the portraits are written to. Created if missing.
    pub output_dir: PathBuf,
    /// Card database files (JSON or XML), merged in order.
    pub metadata: Vec<PathBuf>,
    /// Input image extensions, without the dot.
    pub extensions: Vec<String>,
    pub crop_boxes: CropBoxes,
    /// Set prefix used to build card codes from XML card numbers.
    pub xml_code_prefix: String,
    /// Log progress every this many assets; 0 disables.
    pub progress_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("public/cards"),
            output_dir: PathBuf::from("public/cardPortraits"),
            metadata: Vec::new(),
            extensions: vec!["png".to_string()],
            crop_boxes: CropBoxes::default(),
            xml_code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            progress_interval: 10,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not a valid
    /// configuration, including rectangles with non-positive size.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{NARROW_BOX, WIDE_BOX};

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();

        assert_eq!(config.input_dir, PathBuf::from("public/cards"));
        assert_eq!(config.output_dir, PathBuf::from("public/cardPortraits"));
        assert_eq!(config.extensions, vec!["png"]);
        assert_eq!(config.crop_boxes.wide, WIDE_BOX);
        assert_eq!(config.crop_boxes.narrow, NARROW_BOX);
        assert_eq!(config.xml_code_prefix, "01");
        assert_eq!(config.progress_interval, 10);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PipelineConfig::from_json("{}").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = PipelineConfig::from_json(
            r#"{
                "metadata": ["Core.json", "core.xml"],
                "extensions": ["png", "jpg"],
                "crop_boxes": {"wide": [0, 0, 100, 100]}
            }"#,
        )
        .unwrap();

        assert_eq!(config.metadata.len(), 2);
        assert_eq!(config.extensions, vec!["png", "jpg"]);
        assert_eq!(config.crop_boxes.wide.dimensions(), (100, 100));
        assert_eq!(config.crop_boxes.narrow, NARROW_BOX);
        assert_eq!(config.input_dir, PathBuf::from("public/cards"));
    }

    #[test]
    fn test_invalid_rect_rejected() {
        let result = PipelineConfig::from_json(r#"{"crop_boxes": {"wide": [10, 10, 10, 50]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(PipelineConfig::from_json(r#"{"input": "cards"}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_file(Path::new("/nonexistent/portraits.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
