// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # gifseries
//!
//! Reader and writer library for GIF strain series files.
//!
//! A GIF raw file is a flat array of native `f64` samples for one channel.
//! Its start time is encoded in the file name (`YYMMDDHHmm`, local time at
//! UTC+9) and its sample rate is known per channel. This library turns such
//! files into [`Series`] values with GPS timing, and dispatches reads and
//! writes through a [`FormatRegistry`] keyed by format name and series kind.
//!
//! ## Architecture
//!
//! - `core/` - error type, series container, channel rates, GPS time
//! - `signal/` - anti-aliased integer decimation
//! - `io/` - raw sample loading, options, reader/writer traits, registry
//! - `io/formats/gif/` - binary reader, text writer and text reader
//! - `config` - TOML configuration
//!
//! ## Example: Reading a raw file
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gifseries::{read_gif_series, ChannelRates, GapPolicy, ReadOptions, SeriesKind};
//!
//! let series = read_gif_series(
//!     "2304151230.gif",
//!     SeriesKind::TimeSeries,
//!     &ReadOptions::new()
//!         .sample_rate(200.0)
//!         .gap_policy(GapPolicy::fill_missing())
//!         .decimate_to(8.0),
//!     &ChannelRates::new(),
//! )?;
//! println!("{} samples from GPS {}", series.len(), series.x0());
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Registry dispatch
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use gifseries::{FormatRegistry, GifConfig, ReadOptions, SeriesKind, WriteOptions};
//!
//! let config = GifConfig::load("gifseries.toml")?;
//! let registry = Arc::new(FormatRegistry::with_default_formats(&config)?);
//!
//! let options = ReadOptions::new().channel("K1:PEM-EX_SEIS_X");
//! let series = registry.read_auto(SeriesKind::TimeSeries, "2304151230.gif", &options)?;
//! registry.write("txt", &series, "2304151230.txt", &WriteOptions::new())?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{ChannelRates, GifError, Result, Series, SeriesKind};

// Signal processing
pub mod signal;

// I/O types (raw files, options, traits, registry, formats)
pub mod io;

// Re-export key I/O types
pub use io::formats::gif::{
    read_gif_series, read_text_series, register_gif_series_io, write_gif_series, FormatDefaults,
};
pub use io::{FormatRegistry, GapPolicy, IndexMode, ReadOptions, WriteOptions};

// Configuration
pub mod config;
pub use config::GifConfig;
