// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Traits for the callables stored in the format registry.
//!
//! Each trait has a blanket implementation for matching closures, so a
//! registration can pass either a closure or a dedicated type.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gifseries::io::options::ReadOptions;
//! use gifseries::io::traits::SeriesReader;
//! use gifseries::{Result, Series, SeriesKind};
//!
//! struct Zeros;
//!
//! impl SeriesReader for Zeros {
//!     fn read(&self, _path: &Path, _options: &ReadOptions) -> Result<Series> {
//!         Series::new(SeriesKind::TimeSeries, vec![0.0; 8], 0.0, 1.0)
//!     }
//! }
//! ```

use std::path::Path;

use crate::core::error::Result;
use crate::core::series::Series;

use super::options::{ReadOptions, WriteOptions};

/// Reads a series from a file.
pub trait SeriesReader: Send + Sync {
    /// Read the file at `path` using the merged options.
    fn read(&self, path: &Path, options: &ReadOptions) -> Result<Series>;
}

impl<F> SeriesReader for F
where
    F: Fn(&Path, &ReadOptions) -> Result<Series> + Send + Sync,
{
    fn read(&self, path: &Path, options: &ReadOptions) -> Result<Series> {
        self(path, options)
    }
}

/// Writes a series to a file.
pub trait SeriesWriter: Send + Sync {
    /// Write `series` to `path` using the merged options.
    fn write(&self, series: &Series, path: &Path, options: &WriteOptions) -> Result<()>;
}

impl<F> SeriesWriter for F
where
    F: Fn(&Series, &Path, &WriteOptions) -> Result<()> + Send + Sync,
{
    fn write(&self, series: &Series, path: &Path, options: &WriteOptions) -> Result<()> {
        self(series, path, options)
    }
}

/// Decides whether a file looks like a given format.
pub trait FormatIdentifier: Send + Sync {
    /// Whether `path` matches.
    fn identify(&self, path: &Path) -> bool;
}

impl<F> FormatIdentifier for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn identify(&self, path: &Path) -> bool {
        self(path)
    }
}
