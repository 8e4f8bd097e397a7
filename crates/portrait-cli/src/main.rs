//! `card-portraits` - batch card portrait cropper.
//!
//! ```text
//! card-portraits crop --metadata RingsDB/json/Core.json --metadata sets/core.xml
//! card-portraits convert --input public/cards
//! ```
//!
//! Logs go to stderr (`RUST_LOG` filters, `LOG_FORMAT=json` for JSON lines);
//! the run summary goes to stdout. Individual images that fail are reported
//! in the summary and do not change the exit status.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command, ConvertArgs, CropArgs};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Crop(args) => crop(&args),
        Command::Convert(args) => convert(&args),
    }
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("card_portraits=info,portrait_core=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

fn crop(args: &CropArgs) -> anyhow::Result<()> {
    let config = args.resolve().context("Failed to load configuration")?;
    if config.metadata.is_empty() {
        tracing::warn!("no metadata sources given; every card will use the wide box");
    }

    let summary = portrait_core::crop_portraits(&config).context("Crop batch aborted")?;
    println!("{summary}");
    Ok(())
}

fn convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let plan = args.resolve().context("Failed to load configuration")?;
    let output = &plan.output;

    let summary = portrait_core::convert_directory(&plan.input, output, plan.progress_interval)
        .context("Conversion aborted")?;

    println!("Found {} JPEG images to convert.", summary.found);
    println!("Converted {} images into {}.", summary.converted, output.display());
    println!("Failed: {}", summary.failed());
    for failure in &summary.failures {
        println!("  {}: {}", failure.path.display(), failure.error);
    }
    Ok(())
}
