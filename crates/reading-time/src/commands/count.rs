//! Words and images commands: raw counts for a file.

use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use reading_time_core::estimate;

use super::read_input_file;

/// Arguments for the `words` and `images` subcommands.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// File to count (HTML or plain text).
    pub file: Utf8PathBuf,
}

#[derive(Serialize)]
struct CountReport<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<usize>,
}

/// Count the words in a file.
#[instrument(name = "cmd_words", skip_all, fields(file = %args.file))]
pub fn cmd_words(
    args: CountArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing words command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let words = estimate::word_count(&content);

    print_count(
        CountReport {
            file: args.file.as_str(),
            words: Some(words),
            images: None,
        },
        words,
        global_json,
    )
}

/// Count the `<img>` elements in a file.
#[instrument(name = "cmd_images", skip_all, fields(file = %args.file))]
pub fn cmd_images(
    args: CountArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing images command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let images = estimate::img_count(&content);

    print_count(
        CountReport {
            file: args.file.as_str(),
            words: None,
            images: Some(images),
        },
        images,
        global_json,
    )
}

fn print_count(report: CountReport<'_>, count: usize, global_json: bool) -> anyhow::Result<()> {
    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{count}");
    }
    Ok(())
}
