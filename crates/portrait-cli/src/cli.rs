//! Command-line arguments and their merge onto the file configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use portrait_core::{ConfigError, PipelineConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Crop card scans into portrait thumbnails", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crop every card image into a portrait, choosing the box by card type
    Crop(CropArgs),
    /// Convert JPEG card images to PNG
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct CropArgs {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with the full card images
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Directory to write portraits into
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Card database (JSON or XML); repeat for several sources
    #[arg(long, short)]
    pub metadata: Vec<PathBuf>,

    /// Input image extension; repeat for several
    #[arg(long = "extension", short = 'e')]
    pub extensions: Vec<String>,
}

impl CropArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    ///
    /// Metadata sources given as flags are appended after the ones in the
    /// file; extensions given as flags replace the file's list.
    pub fn resolve(&self) -> Result<PipelineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        config.metadata.extend(self.metadata.iter().cloned());
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }

        Ok(config)
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// JSON configuration file; `input_dir` and `progress_interval` are used
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with JPEG card images [default: public/cards]
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Directory to write PNGs into (defaults to the input directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Directories and progress cadence for one conversion pass.
#[derive(Debug, PartialEq, Eq)]
pub struct ConvertPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub progress_interval: usize,
}

impl ConvertArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    pub fn resolve(&self) -> Result<ConvertPlan, ConfigError> {
        let config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        let input = self.input.clone().unwrap_or(config.input_dir);
        let output = self.output.clone().unwrap_or_else(|| input.clone());
        Ok(ConvertPlan {
            input,
            output,
            progress_interval: config.progress_interval,
        })
    }
}
