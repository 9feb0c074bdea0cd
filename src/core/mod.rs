// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout gifseries.
//!
//! This module provides the foundational types for the library:
//! - [`GifError`] - Error taxonomy shared by every operation
//! - [`Series`] - Sampled data with GPS timing metadata
//! - [`ChannelRates`] - Channel name to sample rate registry
//! - [`time`] - GPS conversion and file-name timestamps

pub mod error;
pub mod registry;
pub mod series;
pub mod time;

pub use error::{GifError, Result};
pub use registry::ChannelRates;
pub use series::{ParseSeriesKindError, Series, SeriesKind, DEFAULT_UNIT};
pub use time::{from_gps, parse_filename_timestamp, to_gps};
