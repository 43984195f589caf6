//! Estimate command: reading time of a file.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use reading_time_core::estimate::{self, Estimate, EstimateConfig, Rounding};

use super::read_input_file;

/// Arguments for the `estimate` subcommand.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// File to estimate (HTML or plain text).
    pub file: Utf8PathBuf,

    /// Reading rate in words per minute.
    #[arg(long)]
    pub wpm: Option<u32>,

    /// Label for a one-minute reading time.
    #[arg(long)]
    pub postfix: Option<String>,

    /// Label for any other reading time.
    #[arg(long)]
    pub plural: Option<String>,

    /// Add image viewing time to the reading time.
    #[arg(long, overrides_with = "no_image_time")]
    pub image_time: bool,

    /// Leave image viewing time out, even if configured.
    #[arg(long, overrides_with = "image_time")]
    pub no_image_time: bool,

    /// Seconds added to the reading time.
    #[arg(long, value_name = "SECONDS")]
    pub extra: Option<u32>,

    /// How to round to whole minutes.
    #[arg(long, value_enum)]
    pub rounding: Option<Rounding>,
}

impl EstimateArgs {
    /// The image-time setting given on the command line, if any.
    pub const fn image_time_flag(&self) -> Option<bool> {
        if self.image_time {
            Some(true)
        } else if self.no_image_time {
            Some(false)
        } else {
            None
        }
    }

    /// Layer the command-line flags over `config`.
    pub fn apply(&self, config: EstimateConfig) -> EstimateConfig {
        EstimateConfig {
            wpm: self.wpm.unwrap_or(config.wpm),
            postfix: self.postfix.clone().unwrap_or(config.postfix),
            plural: self.plural.clone().unwrap_or(config.plural),
            image_time: self.image_time_flag().unwrap_or(config.image_time),
            extra_seconds: self.extra.unwrap_or(config.extra_seconds),
            rounding: self.rounding.unwrap_or(config.rounding),
        }
    }
}

/// The one-line summary printed for an estimate.
pub fn summary(report: &Estimate) -> String {
    format!(
        "It will take {} {} words and {} images at {} words per minute.",
        report.formatted, report.words, report.images, report.wpm
    )
}

/// Estimate the reading time of a file.
#[instrument(name = "cmd_estimate", skip_all, fields(file = %args.file))]
pub fn cmd_estimate(
    args: EstimateArgs,
    global_json: bool,
    config: EstimateConfig,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, wpm = ?args.wpm, rounding = ?args.rounding, "executing estimate command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let config = args.apply(config);

    let report = estimate::estimate(&content, &config)
        .with_context(|| format!("failed to estimate reading time of {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary(&report));
    }

    Ok(())
}
