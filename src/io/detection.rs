// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format identification by file extension.
//!
//! GIF raw files carry no magic number, so a format is recognised by the
//! extension of the path alone. [`identify_factory`] builds the identifier
//! that [`register_gif_series_io`](crate::io::formats::gif::register_gif_series_io)
//! installs when identification is requested.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use gifseries::io::detection::identify_factory;
//!
//! let is_csv = identify_factory(["csv"]);
//! assert!(is_csv(Path::new("2304151230.CSV")));
//! assert!(!is_csv(Path::new("2304151230.txt")));
//! ```

use std::path::Path;

/// Lower-cased extension of `path`, if it has one.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Build an identifier matching any of `extensions` (case-insensitive,
/// with or without a leading dot).
pub fn identify_factory<I, S>(extensions: I) -> impl Fn(&Path) -> bool + Send + Sync + Clone
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extensions: Vec<String> = extensions
        .into_iter()
        .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
        .collect();

    move |path: &Path| {
        extension_of(path)
            .map(|ext| extensions.iter().any(|e| *e == ext))
            .unwrap_or(false)
    }
}
