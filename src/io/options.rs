// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Read and write options.
//!
//! [`ReadOptions`] and [`WriteOptions`] hold every knob as an `Option` so
//! registration defaults and per-call options can be layered with
//! [`ReadOptions::merge`]: a field set at call time wins over the default.
//! [`ReadOptions::resolve`] then turns the merged options into a
//! [`ReadConfig`] in which every policy is explicit.

use std::path::Path;

use crate::core::error::{GifError, Result};
use crate::core::registry::ChannelRates;
use crate::core::series::DEFAULT_UNIT;
use crate::core::time::{gps_from_filename, DEFAULT_UTC_OFFSET_HOURS};
use crate::signal::decimate::decimation_factor;

/// Length of the no-data run substituted for a missing file, in seconds.
pub const DEFAULT_GAP_DURATION: f64 = 60.0;

/// Where the sample rate comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSource {
    /// Caller supplied a fixed rate
    Fixed(f64),
    /// Rate looked up in the channel registry
    Channel(String),
}

/// Where the start time comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartSource {
    /// Caller supplied the GPS start time
    Explicit(f64),
    /// Parse the `YYMMDDHHmm` prefix of the file name in a fixed-offset zone
    FromFilename {
        /// Hours east of UTC of the clock that named the file
        utc_offset_hours: i32,
    },
}

impl StartSource {
    /// Resolve the GPS start time for `path`.
    pub fn resolve(&self, path: &Path) -> Result<f64> {
        match *self {
            StartSource::Explicit(gps) => Ok(gps),
            StartSource::FromFilename { utc_offset_hours } => {
                gps_from_filename(path, utc_offset_hours)
            }
        }
    }
}

/// What to do when the data file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GapPolicy {
    /// Surface the I/O error
    #[default]
    Strict,
    /// Log a warning and substitute `NaN` samples covering `duration` seconds
    FillMissing {
        /// Length of the substituted run in seconds
        duration: f64,
    },
}

impl GapPolicy {
    /// Fill missing files with the default 60 s of `NaN`.
    pub fn fill_missing() -> Self {
        GapPolicy::FillMissing {
            duration: DEFAULT_GAP_DURATION,
        }
    }
}

/// How sample times are attached to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// Start time plus fixed spacing
    #[default]
    Regular,
    /// Additionally attach an explicit per-sample index
    Explicit,
}

/// Options accepted by series readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    pub sample_rate: Option<f64>,
    pub channel: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    /// GPS start time; when unset it is parsed from the file name
    pub start: Option<f64>,
    /// GPS time at which to stop (exclusive)
    pub end: Option<f64>,
    pub utc_offset_hours: Option<i32>,
    pub gap_policy: Option<GapPolicy>,
    /// Target rate for decimation
    pub decimate_to: Option<f64>,
    pub index_mode: Option<IndexMode>,
    /// Column delimiter for text formats
    pub delimiter: Option<String>,
    /// Comment prefix for text formats
    pub comment: Option<String>,
}

impl ReadOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn start(mut self, gps: f64) -> Self {
        self.start = Some(gps);
        self
    }

    pub fn end(mut self, gps: f64) -> Self {
        self.end = Some(gps);
        self
    }

    pub fn utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = Some(hours);
        self
    }

    pub fn gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = Some(policy);
        self
    }

    pub fn decimate_to(mut self, rate: f64) -> Self {
        self.decimate_to = Some(rate);
        self
    }

    pub fn index_mode(mut self, mode: IndexMode) -> Self {
        self.index_mode = Some(mode);
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(&self, overrides: &ReadOptions) -> ReadOptions {
        ReadOptions {
            sample_rate: overrides.sample_rate.or(self.sample_rate),
            channel: overrides.channel.clone().or_else(|| self.channel.clone()),
            name: overrides.name.clone().or_else(|| self.name.clone()),
            unit: overrides.unit.clone().or_else(|| self.unit.clone()),
            start: overrides.start.or(self.start),
            end: overrides.end.or(self.end),
            utc_offset_hours: overrides.utc_offset_hours.or(self.utc_offset_hours),
            gap_policy: overrides.gap_policy.or(self.gap_policy),
            decimate_to: overrides.decimate_to.or(self.decimate_to),
            index_mode: overrides.index_mode.or(self.index_mode),
            delimiter: overrides.delimiter.clone().or_else(|| self.delimiter.clone()),
            comment: overrides.comment.clone().or_else(|| self.comment.clone()),
        }
    }

    /// Resolve into a [`ReadConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`GifError::Configuration`] when no sample rate can be
    /// resolved (neither a fixed rate nor a registered channel), when the
    /// rate is not positive, or when the decimation target does not divide
    /// the source rate.
    pub fn resolve(&self, rates: &ChannelRates) -> Result<ReadConfig> {
        let (rate_source, sample_rate) = match (self.sample_rate, &self.channel) {
            (Some(rate), _) => (RateSource::Fixed(rate), rate),
            (None, Some(channel)) => (RateSource::Channel(channel.clone()), rates.require(channel)?),
            (None, None) => {
                return Err(GifError::configuration(
                    "no sample rate: set sample_rate or name a channel with a registered rate",
                ))
            }
        };
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(GifError::configuration(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }

        let start = match self.start {
            Some(gps) => StartSource::Explicit(gps),
            None => StartSource::FromFilename {
                utc_offset_hours: self.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS),
            },
        };

        let gap_policy = self.gap_policy.unwrap_or_default();
        if let GapPolicy::FillMissing { duration } = gap_policy {
            if !(duration.is_finite() && duration >= 0.0) {
                return Err(GifError::configuration(format!(
                    "gap duration must be non-negative, got {duration}"
                )));
            }
        }

        let decimation = match self.decimate_to {
            Some(target) => Some((target, decimation_factor(sample_rate, target)?)),
            None => None,
        };

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end <= start {
                return Err(GifError::configuration(format!(
                    "end {end} must be after start {start}"
                )));
            }
        }

        Ok(ReadConfig {
            rate_source,
            sample_rate,
            start,
            end: self.end,
            gap_policy,
            decimation,
            index_mode: self.index_mode.unwrap_or_default(),
            unit: self.unit.clone().unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            name: self.name.clone().or_else(|| self.channel.clone()),
            channel: self.channel.clone(),
        })
    }
}

/// Fully resolved read configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadConfig {
    pub rate_source: RateSource,
    /// Source sample rate in Hz
    pub sample_rate: f64,
    pub start: StartSource,
    pub end: Option<f64>,
    pub gap_policy: GapPolicy,
    /// Target rate and integer factor
    pub decimation: Option<(f64, usize)>,
    pub index_mode: IndexMode,
    pub unit: String,
    pub name: Option<String>,
    pub channel: Option<String>,
}

/// Options accepted by series writers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOptions {
    pub delimiter: Option<String>,
    /// Digits after the decimal point in scientific notation
    pub precision: Option<usize>,
    /// Header text, written line by line behind the comment prefix
    pub header: Option<String>,
    pub comment: Option<String>,
}

impl WriteOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(&self, overrides: &WriteOptions) -> WriteOptions {
        WriteOptions {
            delimiter: overrides.delimiter.clone().or_else(|| self.delimiter.clone()),
            precision: overrides.precision.or(self.precision),
            header: overrides.header.clone().or_else(|| self.header.clone()),
            comment: overrides.comment.clone().or_else(|| self.comment.clone()),
        }
    }

    /// Resolve into a [`TextLayout`].
    pub fn resolve(&self) -> Result<TextLayout> {
        let layout = TextLayout {
            delimiter: self.delimiter.clone().unwrap_or_else(|| " ".to_string()),
            precision: self.precision.unwrap_or(TextLayout::DEFAULT_PRECISION),
            header: self.header.clone(),
            comment: self.comment.clone().unwrap_or_else(|| "# ".to_string()),
        };
        layout.validate()?;
        Ok(layout)
    }
}

/// Resolved two-column text layout shared by the text writer and reader.
///
/// The delimiter is a single ASCII byte. A whitespace delimiter is written
/// as-is but read as any run of whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub delimiter: String,
    pub precision: usize,
    pub header: Option<String>,
    pub comment: String,
}

impl TextLayout {
    /// Digits after the point, as in a `%.18e` format.
    pub const DEFAULT_PRECISION: usize = 18;

    fn validate(&self) -> Result<()> {
        if self.delimiter.len() != 1 || !self.delimiter.is_ascii() {
            return Err(GifError::configuration(format!(
                "column delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if self.comment.trim().is_empty() {
            return Err(GifError::configuration("comment prefix must not be blank"));
        }
        Ok(())
    }

    /// Layout used when reading: only the delimiter and comment matter.
    pub fn for_reading(delimiter: Option<&str>, comment: Option<&str>) -> Result<Self> {
        WriteOptions {
            delimiter: delimiter.map(str::to_string),
            comment: comment.map(str::to_string),
            ..WriteOptions::default()
        }
        .resolve()
    }

    /// Whether columns are separated by arbitrary whitespace.
    pub fn splits_on_whitespace(&self) -> bool {
        self.delimiter.trim().is_empty()
    }

    /// The delimiter as a byte.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes()[0]
    }

    /// The comment prefix without surrounding whitespace; lines starting
    /// with it are skipped when reading.
    pub fn comment_marker(&self) -> &str {
        self.comment.trim()
    }
}
