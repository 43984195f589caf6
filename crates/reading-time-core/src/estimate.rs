//! Reading-time estimation.
//!
//! Reading time is `words / wpm` minutes, optionally extended by image
//! viewing time and a fixed number of extra seconds, rounded to whole
//! minutes and never less than one:
//!
//! ```text
//! seconds = words * 60 / wpm + image seconds + extra seconds
//! minutes = max(1, round(seconds / 60))
//! ```
//!
//! Image viewing time follows Medium's published heuristic: 12 seconds for
//! the first image, 11 for the second, one second less for each further image
//! down to 3 seconds at the tenth, and 3 seconds for every image after that.
//!
//! Minutes are computed with exact integer arithmetic, so with the default
//! configuration the result is exactly `max(1, ceil(words / wpm))`.
//!
//! # Example
//!
//! ```
//! use reading_time_core::estimate::{EstimateConfig, format_reading_time};
//!
//! let text = "word ".repeat(450);
//! let formatted = format_reading_time(&text, &EstimateConfig::default()).unwrap();
//! assert_eq!(formatted, "3 minutes to read");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, EstimateResult};
use crate::html;

/// Default reading rate, in words per minute.
pub const DEFAULT_WPM: u32 = 200;

/// Default label used when the reading time is exactly one minute.
pub const DEFAULT_POSTFIX: &str = "minute to read";

/// Default label used for every other reading time.
pub const DEFAULT_PLURAL: &str = "minutes to read";

/// Seconds attributed to the first image.
const FIRST_IMAGE_SECONDS: u64 = 12;

/// Seconds attributed to each image from the tenth onwards.
const MIN_IMAGE_SECONDS: u64 = 3;

/// How fractional minutes are turned into whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum Rounding {
    /// Round any fraction up (ceiling).
    #[default]
    Up,
    /// Drop any fraction (floor).
    Down,
    /// Round to nearest; halves round up.
    HalfUp,
    /// Round to nearest; halves round to the even neighbour.
    HalfEven,
}

impl Rounding {
    /// Returns the rounding mode as a kebab-case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::HalfUp => "half-up",
            Self::HalfEven => "half-even",
        }
    }

    /// Divide `numerator` by a non-zero `denominator`, rounding by this mode.
    pub const fn divide(self, numerator: u128, denominator: u128) -> u128 {
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        let round_up = match self {
            Self::Up => remainder > 0,
            Self::Down => false,
            Self::HalfUp => remainder * 2 >= denominator,
            Self::HalfEven => {
                remainder * 2 > denominator
                    || (remainder * 2 == denominator && quotient % 2 == 1)
            }
        };
        if round_up { quotient + 1 } else { quotient }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings that control an estimate.
///
/// Word and image counts never depend on these settings; only the reading
/// time and its label do.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EstimateConfig {
    /// Reading rate in words per minute. Must be positive.
    pub wpm: u32,
    /// Label appended when the reading time is one minute.
    pub postfix: String,
    /// Label appended for any other reading time.
    pub plural: String,
    /// Add image viewing time to the reading time.
    pub image_time: bool,
    /// Seconds added to the total reading time.
    pub extra_seconds: u32,
    /// How the total is rounded to whole minutes.
    pub rounding: Rounding,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            postfix: DEFAULT_POSTFIX.to_string(),
            plural: DEFAULT_PLURAL.to_string(),
            image_time: false,
            extra_seconds: 0,
            rounding: Rounding::default(),
        }
    }
}

impl EstimateConfig {
    /// Check that the configuration can be used for an estimate.
    pub const fn validate(&self) -> EstimateResult<()> {
        if self.wpm == 0 {
            return Err(EstimateError::InvalidWordsPerMinute(self.wpm));
        }
        Ok(())
    }

    /// The label for a reading time of `minutes`.
    pub fn label(&self, minutes: u64) -> &str {
        if minutes == 1 {
            &self.postfix
        } else {
            &self.plural
        }
    }

    /// Seconds added on top of the time spent reading words.
    fn added_seconds(&self, images: usize) -> u64 {
        let images = if self.image_time {
            image_seconds(images)
        } else {
            0
        };
        images + u64::from(self.extra_seconds)
    }

    /// Whole minutes for a document, assuming a validated configuration.
    fn minutes(&self, words: usize, images: usize) -> u64 {
        let wpm = u128::from(self.wpm);
        let numerator = words as u128 * 60 + u128::from(self.added_seconds(images)) * wpm;
        let minutes = self.rounding.divide(numerator, wpm * 60);
        u64::try_from(minutes).unwrap_or(u64::MAX).max(1)
    }

    /// Unrounded total seconds, assuming a validated configuration.
    fn seconds(&self, words: usize, images: usize) -> f64 {
        words as f64 * 60.0 / f64::from(self.wpm) + self.added_seconds(images) as f64
    }

    /// Join `minutes` and its label.
    fn format(&self, minutes: u64) -> String {
        let label = self.label(minutes);
        if label.is_empty() {
            minutes.to_string()
        } else {
            format!("{minutes} {label}")
        }
    }
}

/// Result of estimating the reading time of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Number of words in the visible text.
    pub words: usize,
    /// Number of `<img>` elements.
    pub images: usize,
    /// Unrounded reading time in seconds.
    pub seconds: f64,
    /// Reading time in whole minutes, at least one.
    pub minutes: u64,
    /// The unit label chosen for `minutes`.
    pub label: String,
    /// Minutes and label, e.g. `3 minutes to read`.
    pub formatted: String,
    /// Reading rate the estimate was made at.
    pub wpm: u32,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Count the words in `text`, ignoring HTML markup.
///
/// Markup is stripped (see [`html`] for the exact rules) and the remaining
/// text is split on Unicode whitespace. Consecutive whitespace never yields
/// empty words.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn word_count(text: &str) -> usize {
    count_words(&html::visible_text(text))
}

fn count_words(visible: &str) -> usize {
    visible.split_whitespace().count()
}

/// Count the `<img>` elements in `text`, case-insensitively.
///
/// Images mentioned only as URLs, inside comments, or inside script and
/// style contents are not counted.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn img_count(text: &str) -> usize {
    html::image_count(text)
}

/// Word and image counts from a single parse of `text`.
fn counts(text: &str) -> (usize, usize) {
    let content = html::extract(text);
    (count_words(&content.text), content.images)
}

/// Viewing time in seconds for `images` images.
pub fn image_seconds(images: usize) -> u64 {
    let images = images as u64;
    let tapered = images.min(FIRST_IMAGE_SECONDS - MIN_IMAGE_SECONDS + 1);
    let tapered_seconds: u64 = (0..tapered).map(|i| FIRST_IMAGE_SECONDS - i).sum();
    tapered_seconds + (images - tapered) * MIN_IMAGE_SECONDS
}

/// Reading time of `text` in whole minutes, never less than one.
pub fn calc_reading_time(text: &str, config: &EstimateConfig) -> EstimateResult<u64> {
    config.validate()?;
    let (words, images) = counts(text);
    Ok(config.minutes(words, images))
}

/// Unrounded reading time of `text` in seconds.
pub fn reading_seconds(text: &str, config: &EstimateConfig) -> EstimateResult<f64> {
    config.validate()?;
    let (words, images) = counts(text);
    Ok(config.seconds(words, images))
}

/// Reading time of `text` with its unit label, e.g. `1 minute to read`.
///
/// When the chosen label is empty, only the number is returned.
pub fn format_reading_time(text: &str, config: &EstimateConfig) -> EstimateResult<String> {
    let minutes = calc_reading_time(text, config)?;
    Ok(config.format(minutes))
}

/// Compute every figure of an estimate in one pass over `text`.
#[tracing::instrument(skip(text), fields(text_len = text.len(), wpm = config.wpm))]
pub fn estimate(text: &str, config: &EstimateConfig) -> EstimateResult<Estimate> {
    config.validate()?;
    let (words, images) = counts(text);
    Ok(build_estimate(words, images, config))
}

fn build_estimate(words: usize, images: usize, config: &EstimateConfig) -> Estimate {
    let minutes = config.minutes(words, images);
    let estimate = Estimate {
        words,
        images,
        seconds: config.seconds(words, images),
        minutes,
        label: config.label(minutes).to_string(),
        formatted: config.format(minutes),
        wpm: config.wpm,
    };
    tracing::debug!(
        words,
        images,
        minutes,
        seconds = estimate.seconds,
        "estimated reading time"
    );
    estimate
}

/// A document paired with the configuration used to estimate it.
///
/// Word and image counts are computed once when the value is built.
///
/// ```
/// use reading_time_core::ReadingTime;
///
/// let rt = ReadingTime::builder()
///     .text("<p>Short <b>post</b></p><img src=\"a.png\">")
///     .postfix("min read")
///     .plural("min read")
///     .build()
///     .unwrap();
///
/// assert_eq!(rt.word_count(), 2);
/// assert_eq!(rt.image_count(), 1);
/// assert_eq!(rt.formatted(), "1 min read");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingTime {
    text: String,
    config: EstimateConfig,
    words: usize,
    images: usize,
}

impl ReadingTime {
    /// Estimate `text` with `config`.
    pub fn new(text: impl Into<String>, config: EstimateConfig) -> EstimateResult<Self> {
        config.validate()?;
        let text = text.into();
        let (words, images) = counts(&text);
        Ok(Self {
            text,
            config,
            words,
            images,
        })
    }

    /// Start building a [`ReadingTime`] from default settings.
    pub fn builder() -> ReadingTimeBuilder {
        ReadingTimeBuilder::default()
    }

    /// The document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &EstimateConfig {
        &self.config
    }

    /// Number of words in the document.
    pub const fn word_count(&self) -> usize {
        self.words
    }

    /// Number of `<img>` elements in the document.
    pub const fn image_count(&self) -> usize {
        self.images
    }

    /// Unrounded reading time in seconds.
    pub fn seconds(&self) -> f64 {
        self.config.seconds(self.words, self.images)
    }

    /// Reading time in whole minutes, at least one.
    pub fn minutes(&self) -> u64 {
        self.config.minutes(self.words, self.images)
    }

    /// Reading time with its unit label.
    pub fn formatted(&self) -> String {
        self.config.format(self.minutes())
    }

    /// Every figure of the estimate.
    pub fn estimate(&self) -> Estimate {
        build_estimate(self.words, self.images, &self.config)
    }
}

/// Builder for [`ReadingTime`].
///
/// The text is required; every other setting falls back to
/// [`EstimateConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct ReadingTimeBuilder {
    text: Option<String>,
    config: EstimateConfig,
}

impl ReadingTimeBuilder {
    /// Set the document text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace every setting with `config`.
    pub fn config(mut self, config: EstimateConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the reading rate in words per minute.
    pub const fn wpm(mut self, wpm: u32) -> Self {
        self.config.wpm = wpm;
        self
    }

    /// Set the label used for a one-minute reading time.
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.config.postfix = postfix.into();
        self
    }

    /// Set the label used for every other reading time.
    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.config.plural = plural.into();
        self
    }

    /// Add image viewing time to the reading time.
    pub const fn image_time(mut self, image_time: bool) -> Self {
        self.config.image_time = image_time;
        self
    }

    /// Add a fixed number of seconds to the reading time.
    pub const fn extra_seconds(mut self, extra_seconds: u32) -> Self {
        self.config.extra_seconds = extra_seconds;
        self
    }

    /// Set how the total is rounded to whole minutes.
    pub const fn rounding(mut self, rounding: Rounding) -> Self {
        self.config.rounding = rounding;
        self
    }

    /// Validate the settings and count the document.
    ///
    /// # Errors
    ///
    /// [`EstimateError::MissingText`] if no text was supplied and
    /// [`EstimateError::InvalidWordsPerMinute`] if the rate is zero.
    pub fn build(self) -> EstimateResult<ReadingTime> {
        let text = self.text.ok_or(EstimateError::MissingText)?;
        ReadingTime::new(text, self.config)
    }
}
