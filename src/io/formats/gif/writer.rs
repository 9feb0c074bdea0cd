// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Two-column text writer.
//!
//! Each sample becomes one line `time<delimiter>value`, both columns in
//! scientific notation. `NaN` gap markers are written as `NaN`. Rows go
//! through the `csv` writer with a single-byte delimiter; header lines are
//! written ahead of them behind the comment prefix.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::core::error::{GifError, Result};
use crate::core::series::Series;
use crate::io::options::{TextLayout, WriteOptions};

/// Write `series` to `path` as two text columns, replacing any existing file.
///
/// # Errors
///
/// Returns [`GifError::Configuration`] for an unusable layout and
/// [`GifError::Io`] if the file cannot be created or written.
pub fn write_gif_series<P: AsRef<Path>>(
    series: &Series,
    path: P,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let layout = options.resolve()?;
    let path_str = path.to_string_lossy().to_string();

    let file = File::create(path)
        .map_err(|e| GifError::io(&path_str, format!("failed to create file: {e}")))?;
    let mut writer = BufWriter::new(file);
    write_text(series, &mut writer, &layout).map_err(|e| match e {
        GifError::Io { message, .. } => GifError::io(&path_str, message),
        other => other,
    })?;

    debug!(
        path = %path.display(),
        samples = series.len(),
        gaps = series.gap_count(),
        "wrote series text"
    );
    Ok(())
}

/// Write `series` to any sink using a resolved layout, then flush it.
pub fn write_text<W: Write>(series: &Series, writer: &mut W, layout: &TextLayout) -> Result<()> {
    if let Some(header) = &layout.header {
        for line in header.lines() {
            writeln!(writer, "{}{}", layout.comment, line)?;
        }
    }

    let mut rows = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(layout.delimiter_byte())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&mut *writer);

    let p = layout.precision;
    for (t, v) in series.times().zip(series.values()) {
        let time = format!("{t:.p$e}");
        let value = format!("{v:.p$e}");
        rows.write_record([time.as_str(), value.as_str()])
            .map_err(|e| GifError::io("", e.to_string()))?;
    }
    rows.flush()?;
    drop(rows);
    writer.flush()?;
    Ok(())
}
