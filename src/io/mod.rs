// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for GIF series files.
//!
//! This module provides the raw sample loader, the read/write options, the
//! reader/writer traits and the format registry that dispatches on a
//! `(format, kind)` key.

pub mod detection;
pub mod formats;
pub mod options;
pub mod raw;
pub mod registry;
pub mod traits;

// Re-exports
pub use detection::{extension_of, identify_factory};
pub use options::{
    GapPolicy, IndexMode, RateSource, ReadConfig, ReadOptions, StartSource, TextLayout,
    WriteOptions,
};
pub use raw::{read_raw_samples, write_raw_samples, RawSampleFile};
pub use registry::FormatRegistry;
pub use traits::{FormatIdentifier, SeriesReader, SeriesWriter};
