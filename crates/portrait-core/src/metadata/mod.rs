//! Card metadata loading.
//!
//! Two adapters turn external card databases into [`CardRecord`]s:
//!
//! - [`json`]: RingsDB-style arrays of card objects (`code`, `type_code`)
//! - [`xml`]: set files with `card`/`property` elements (`Card Number`, `Type`)
//!
//! [`load_index`] runs every source through its adapter and merges the
//! results into one [`MetadataIndex`]. Loading is best-effort: a missing or
//! malformed source is logged and contributes what it can, never failing the
//! whole run.

mod index;
pub mod json;
pub mod xml;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::card::CardRecord;

pub use index::MetadataIndex;
pub use json::parse_json;
pub use xml::{parse_xml, synthesize_code, DEFAULT_CODE_PREFIX};

/// A source that could not be parsed completely.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseFailure {
    pub message: String,
    /// Records read before the failure.
    pub recovered: Vec<CardRecord>,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_recovered(message, Vec::new())
    }

    pub fn with_recovered(message: impl Into<String>, recovered: Vec<CardRecord>) -> Self {
        Self {
            message: message.into(),
            recovered,
        }
    }
}

/// Errors raised while reading a metadata source.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The source file does not exist.
    #[error("Metadata source not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// The source exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but is malformed.
    #[error("Failed to parse {}: {failure}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        failure: ParseFailure,
    },
}

/// Card database formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Xml,
}

impl SourceFormat {
    /// Pick a format from the file extension, falling back to the first
    /// non-whitespace character of the contents.
    pub fn detect(path: &Path, contents: &str) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => SourceFormat::Json,
            Some("xml") => SourceFormat::Xml,
            _ if contents.trim_start().starts_with('<') => SourceFormat::Xml,
            _ => SourceFormat::Json,
        }
    }
}

/// Read one source and run it through the matching adapter.
///
/// # Errors
///
/// See [`MetadataError`]. A [`MetadataError::Parse`] still carries the
/// records recovered before the failure.
pub fn load_source(path: &Path, xml_code_prefix: &str) -> Result<Vec<CardRecord>, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::MissingSource(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = match SourceFormat::detect(path, &contents) {
        SourceFormat::Json => parse_json(&contents),
        SourceFormat::Xml => parse_xml(&contents, xml_code_prefix),
    };

    parsed.map_err(|failure| MetadataError::Parse {
        path: path.to_path_buf(),
        failure,
    })
}

/// Build one index from every source, in order.
///
/// Never fails: problems with individual sources are logged as warnings.
/// Later sources replace earlier entries with the same code.
pub fn load_index<P: AsRef<Path>>(sources: &[P], xml_code_prefix: &str) -> MetadataIndex {
    let mut index = MetadataIndex::new();

    for source in sources {
        let path = source.as_ref();
        let records = match load_source(path, xml_code_prefix) {
            Ok(records) => records,
            Err(MetadataError::Parse { path, failure }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %failure,
                    recovered = failure.recovered.len(),
                    "malformed metadata source"
                );
                failure.recovered
            }
            Err(e) => {
                tracing::warn!("{e}");
                continue;
            }
        };

        let count = records.len();
        let added = index.extend(records);
        tracing::info!(path = %path.display(), cards = count, added, "loaded metadata source");
    }

    index
}
