// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Two-column text reader, the inverse of [`write_gif_series`](super::write_gif_series).
//!
//! A whitespace delimiter splits rows on any run of whitespace. Any other
//! single-byte delimiter goes through the `csv` reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::core::error::{GifError, Result};
use crate::core::series::{Series, SeriesKind, DEFAULT_UNIT};
use crate::io::options::{IndexMode, ReadOptions, TextLayout};
use crate::signal::decimate::decimation_factor;

/// Allowed deviation from even spacing, as a fraction of the spacing.
const SPACING_TOLERANCE: f64 = 1e-6;

/// Read a two-column text file written by the text writer.
///
/// Blank lines and lines starting with the comment prefix (`#` unless
/// `comment` is set) are skipped. With a delimiter other than whitespace
/// only the first byte of the prefix marks a comment. Evenly spaced times
/// give a regular series; anything else keeps the times as an explicit
/// index. A single row needs `sample_rate` in the options to fix the spacing.
///
/// # Errors
///
/// - [`GifError::Io`] if the file cannot be read
/// - [`GifError::Parse`] for a malformed row or a file without rows
/// - [`GifError::Configuration`] for a single row without a sample rate, or
///   for `decimate_to` on a series with irregular times
pub fn read_text_series<P: AsRef<Path>>(
    path: P,
    kind: SeriesKind,
    options: &ReadOptions,
) -> Result<Series> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();
    let layout = TextLayout::for_reading(options.delimiter.as_deref(), options.comment.as_deref())?;

    let file = File::open(path)
        .map_err(|e| GifError::io(&path_str, format!("failed to open file: {e}")))?;

    let (times, values) = if layout.splits_on_whitespace() {
        read_whitespace_rows(file, &layout, &path_str)?
    } else {
        read_delimited_rows(file, &layout, &path_str)?
    };

    if times.is_empty() {
        return Err(GifError::parse(path_str, "no data rows"));
    }

    let series = assemble(kind, times, values, options)?;
    let series = finish(series, options)?;

    debug!(
        path = %path.display(),
        samples = series.len(),
        regular = series.xindex().is_none(),
        delimiter = %layout.delimiter.escape_debug(),
        "read text series"
    );
    Ok(series)
}

type Columns = (Vec<f64>, Vec<f64>);

fn read_whitespace_rows(file: File, layout: &TextLayout, path_str: &str) -> Result<Columns> {
    let marker = layout.comment_marker();
    let mut times = Vec::new();
    let mut values = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| GifError::io(path_str, e.to_string()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(marker) {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (t, v) = parse_fields(&fields)
            .map_err(|message| GifError::parse(format!("{path_str}:{}", index + 1), message))?;
        times.push(t);
        values.push(v);
    }
    Ok((times, values))
}

fn read_delimited_rows(file: File, layout: &TextLayout, path_str: &str) -> Result<Columns> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(layout.delimiter_byte())
        .comment(layout.comment_marker().bytes().next())
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(BufReader::new(file));

    let mut times = Vec::new();
    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(e, path_str))?;
        let line = record.position().map_or(0, csv::Position::line);
        let fields: Vec<&str> = record.iter().collect();
        let (t, v) = parse_fields(&fields)
            .map_err(|message| GifError::parse(format!("{path_str}:{line}"), message))?;
        times.push(t);
        values.push(v);
    }
    Ok((times, values))
}

fn csv_error(err: csv::Error, path_str: &str) -> GifError {
    if err.is_io_error() {
        return GifError::io(path_str, err.to_string());
    }
    let line = err.position().map_or(0, csv::Position::line);
    GifError::parse(format!("{path_str}:{line}"), err.to_string())
}

fn parse_fields(fields: &[&str]) -> std::result::Result<(f64, f64), String> {
    if fields.len() != 2 {
        return Err(format!("expected 2 columns, found {}", fields.len()));
    }
    let number = |field: &str| {
        field
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{field}': {e}"))
    };
    Ok((number(fields[0])?, number(fields[1])?))
}

fn assemble(
    kind: SeriesKind,
    times: Vec<f64>,
    values: Vec<f64>,
    options: &ReadOptions,
) -> Result<Series> {
    let x0 = times[0];

    if times.len() == 1 {
        let rate = options.sample_rate.ok_or_else(|| {
            GifError::configuration("a single-row text series needs a sample rate")
        })?;
        return Series::new(kind, values, x0, 1.0 / rate);
    }

    let dx = (times[times.len() - 1] - x0) / (times.len() - 1) as f64;
    let regular = dx > 0.0
        && times
            .iter()
            .enumerate()
            .all(|(i, &t)| {
                let slack = SPACING_TOLERANCE * dx + 4.0 * f64::EPSILON * t.abs();
                (t - (x0 + i as f64 * dx)).abs() <= slack
            });

    if regular {
        return Series::new(kind, values, x0, dx);
    }

    // Irregular times: keep them verbatim behind the mean spacing.
    if !times.windows(2).all(|w| w[1] > w[0]) {
        return Err(GifError::invalid_series("time column is not strictly increasing"));
    }
    Series::new(kind, values, x0, dx)?.with_xindex(times)
}

fn finish(mut series: Series, options: &ReadOptions) -> Result<Series> {
    series = series.with_unit(options.unit.as_deref().unwrap_or(DEFAULT_UNIT));
    if let Some(name) = options.name.as_ref().or(options.channel.as_ref()) {
        series = series.with_name(name.as_str());
    }
    if let Some(channel) = &options.channel {
        series = series.with_channel(channel.as_str());
    }

    if let Some(target) = options.decimate_to {
        if series.xindex().is_some() {
            return Err(GifError::configuration(format!(
                "cannot decimate to {target} Hz: the time column is not evenly spaced"
            )));
        }
        let factor = decimation_factor(series.sample_rate(), target)?;
        series = series.decimate(factor)?;
    }
    if options.index_mode == Some(IndexMode::Explicit) && series.xindex().is_none() {
        series = series.with_regular_xindex();
    }
    if options.start.is_some() || options.end.is_some() {
        series = series.crop(options.start, options.end)?;
    }
    Ok(series)
}
