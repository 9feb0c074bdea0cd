// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary GIF series reader.
//!
//! A GIF raw file holds one channel of native `f64` samples with no header.
//! Timing comes from the options: the sample rate is fixed or looked up by
//! channel, and the start time is explicit or parsed from the file name.

use std::path::Path;

use tracing::{debug, warn};

use crate::core::error::{GifError, Result};
use crate::core::registry::ChannelRates;
use crate::core::series::{Series, SeriesKind};
use crate::core::time::format_gps;
use crate::io::options::{GapPolicy, IndexMode, ReadConfig, ReadOptions};
use crate::io::raw::read_raw_samples;

/// Read a GIF raw file into a series.
///
/// # Errors
///
/// - [`GifError::Configuration`] if no sample rate can be resolved, the
///   decimation target does not divide it, or `end` is not after the start
/// - [`GifError::Parse`] if the start time must come from the file name and
///   the name carries no valid timestamp, or if the file is truncated
/// - [`GifError::Io`] if the file cannot be read under [`GapPolicy::Strict`]
pub fn read_gif_series<P: AsRef<Path>>(
    path: P,
    kind: SeriesKind,
    options: &ReadOptions,
    rates: &ChannelRates,
) -> Result<Series> {
    let config = options.resolve(rates)?;
    read_with_config(path.as_ref(), kind, &config)
}

/// Read a GIF raw file with an already resolved configuration.
pub fn read_with_config(path: &Path, kind: SeriesKind, config: &ReadConfig) -> Result<Series> {
    let start = config.start.resolve(path)?;
    if let Some(end) = config.end {
        if end <= start {
            return Err(GifError::configuration(format!(
                "end {end} must be after start {start} ({})",
                format_gps(start)
            )));
        }
    }
    let rate = config.sample_rate;

    let values = match read_raw_samples(path) {
        Ok(values) => values,
        Err(err) if err.is_io() => match config.gap_policy {
            GapPolicy::Strict => return Err(err),
            GapPolicy::FillMissing { duration } => {
                let count = (duration * rate).round() as usize;
                warn!(
                    path = %path.display(),
                    error = %err,
                    samples = count,
                    start = %format_gps(start),
                    "data file unreadable, filling {duration} s with NaN"
                );
                vec![f64::NAN; count]
            }
        },
        Err(err) => return Err(err),
    };

    let mut series = Series::new(kind, values, start, 1.0 / rate)?.with_unit(config.unit.as_str());
    if let Some(name) = &config.name {
        series = series.with_name(name.as_str());
    }
    if let Some(channel) = &config.channel {
        series = series.with_channel(channel.as_str());
    }

    if let Some((target, factor)) = config.decimation {
        debug!(from = rate, to = target, factor, "decimating");
        series = series.decimate(factor)?;
    }

    if config.index_mode == IndexMode::Explicit {
        series = series.with_regular_xindex();
    }

    if config.end.is_some() {
        series = series.crop(None, config.end)?;
    }

    debug!(
        path = %path.display(),
        samples = series.len(),
        rate = series.sample_rate(),
        rate_source = ?config.rate_source,
        gaps = series.gap_count(),
        "read gif series"
    );
    Ok(series)
}
