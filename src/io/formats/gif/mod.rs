// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! GIF series format.
//!
//! The `gif` format reads the raw binary sample files and writes the
//! two-column text form. The `txt` and `csv` formats read and write the text
//! form only, so a series written as text can be read back.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gifseries::core::registry::ChannelRates;
//! use gifseries::io::formats::gif::{register_gif_series_io, FormatDefaults};
//! use gifseries::io::options::ReadOptions;
//! use gifseries::io::FormatRegistry;
//! use gifseries::SeriesKind;
//!
//! let mut registry = FormatRegistry::new();
//! register_gif_series_io(
//!     &mut registry,
//!     SeriesKind::TimeSeries,
//!     "gif",
//!     true,
//!     Arc::new(ChannelRates::new()),
//!     FormatDefaults::new().read(ReadOptions::new().sample_rate(200.0)),
//! );
//! let series = registry.read_auto(SeriesKind::TimeSeries, "2304151230.gif", &ReadOptions::new())?;
//! # Ok::<(), gifseries::GifError>(())
//! ```

pub mod reader;
pub mod text;
pub mod writer;

use std::path::Path;
use std::sync::Arc;

use crate::config::GifConfig;
use crate::core::error::Result;
use crate::core::registry::ChannelRates;
use crate::core::series::{Series, SeriesKind};
use crate::io::detection::identify_factory;
use crate::io::options::{ReadOptions, WriteOptions};
use crate::io::registry::FormatRegistry;

pub use reader::{read_gif_series, read_with_config};
pub use text::read_text_series;
pub use writer::{write_gif_series, write_text};

/// Options bound at registration time.
///
/// Per-call options are merged over these field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatDefaults {
    pub read: ReadOptions,
    pub write: WriteOptions,
    /// Extensions recognised by the identifier; the format name when empty
    pub extensions: Vec<String>,
}

impl FormatDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(mut self, read: ReadOptions) -> Self {
        self.read = read;
        self
    }

    pub fn write(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Bind the same column delimiter for reading and writing.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        self.read.delimiter = Some(delimiter.clone());
        self.write.delimiter = Some(delimiter);
        self
    }

    /// Bind the same comment prefix for reading and writing.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.read.comment = Some(comment.clone());
        self.write.comment = Some(comment);
        self
    }

    fn identifier_extensions(&self, format: &str) -> Vec<String> {
        if self.extensions.is_empty() {
            vec![format.to_string()]
        } else {
            self.extensions.clone()
        }
    }
}

fn register_writer(
    registry: &mut FormatRegistry,
    kind: SeriesKind,
    format: &str,
    defaults: WriteOptions,
) {
    registry.register_writer(
        format,
        kind,
        move |series: &Series, path: &Path, options: &WriteOptions| -> Result<()> {
            write_gif_series(series, path, &defaults.merge(options))
        },
    );
}

fn register_identifier(
    registry: &mut FormatRegistry,
    kind: SeriesKind,
    format: &str,
    defaults: &FormatDefaults,
) {
    let identify = identify_factory(defaults.identifier_extensions(format));
    registry.register_identifier(format, kind, identify);
}

/// Register the binary GIF reader and the text writer for `(format, kind)`.
///
/// The reader resolves channel sample rates through `rates`. When
/// `identify` is set an extension-based identifier is registered too.
/// Existing registrations for the same key are replaced.
pub fn register_gif_series_io(
    registry: &mut FormatRegistry,
    kind: SeriesKind,
    format: &str,
    identify: bool,
    rates: Arc<ChannelRates>,
    defaults: FormatDefaults,
) {
    let read_defaults = defaults.read.clone();
    registry.register_reader(
        format,
        kind,
        move |path: &Path, options: &ReadOptions| -> Result<Series> {
            read_gif_series(path, kind, &read_defaults.merge(options), &rates)
        },
    );
    register_writer(registry, kind, format, defaults.write.clone());
    if identify {
        register_identifier(registry, kind, format, &defaults);
    }
}

/// Register the text reader and writer for `(format, kind)`.
pub fn register_text_series_io(
    registry: &mut FormatRegistry,
    kind: SeriesKind,
    format: &str,
    identify: bool,
    defaults: FormatDefaults,
) {
    let read_defaults = defaults.read.clone();
    registry.register_reader(
        format,
        kind,
        move |path: &Path, options: &ReadOptions| -> Result<Series> {
            read_text_series(path, kind, &read_defaults.merge(options))
        },
    );
    register_writer(registry, kind, format, defaults.write.clone());
    if identify {
        register_identifier(registry, kind, format, &defaults);
    }
}

/// Register `gif`, `txt` and `csv` for every series kind.
///
/// # Errors
///
/// Returns [`GifError::Configuration`](crate::GifError::Configuration) if the
/// configured channel rates are invalid.
pub fn register_default_formats(registry: &mut FormatRegistry, config: &GifConfig) -> Result<()> {
    let rates = Arc::new(config.channel_rates()?);
    let gif_defaults = FormatDefaults::new()
        .read(config.read_defaults())
        .extensions(config.extensions.iter().cloned());
    let text_read = ReadOptions {
        unit: Some(config.unit.clone()),
        ..ReadOptions::default()
    };

    for kind in SeriesKind::ALL {
        register_gif_series_io(registry, kind, "gif", true, rates.clone(), gif_defaults.clone());
        register_text_series_io(
            registry,
            kind,
            "txt",
            true,
            FormatDefaults::new().read(text_read.clone()),
        );
        register_text_series_io(
            registry,
            kind,
            "csv",
            true,
            FormatDefaults::new().read(text_read.clone()).with_delimiter(","),
        );
    }
    Ok(())
}
