// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format registry for dispatching reads and writes.
//!
//! The registry maps a `(format name, SeriesKind)` pair to at most one
//! reader, one writer and one identifier. It is filled once at start-up
//! through `&mut self` and then shared read-only, typically behind an
//! `Arc`; there is no process-wide table.
//!
//! Registering a second callable for an occupied slot replaces the first
//! and logs a warning. The `try_register_*` variants refuse instead.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gifseries::config::GifConfig;
//! use gifseries::io::options::ReadOptions;
//! use gifseries::io::FormatRegistry;
//! use gifseries::SeriesKind;
//!
//! let registry = Arc::new(FormatRegistry::with_default_formats(&GifConfig::default())?);
//! let series = registry.read(
//!     "gif",
//!     SeriesKind::TimeSeries,
//!     "2304151230.gif",
//!     &ReadOptions::new().sample_rate(200.0),
//! )?;
//! # Ok::<(), gifseries::GifError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::GifConfig;
use crate::core::error::{GifError, Result};
use crate::core::series::{Series, SeriesKind};

use super::options::{ReadOptions, WriteOptions};
use super::traits::{FormatIdentifier, SeriesReader, SeriesWriter};

type RegistryKey = (String, SeriesKind);

#[derive(Default)]
struct FormatEntry {
    reader: Option<Arc<dyn SeriesReader>>,
    writer: Option<Arc<dyn SeriesWriter>>,
    identifier: Option<Arc<dyn FormatIdentifier>>,
}

/// Registry of readers, writers and identifiers keyed by format and kind.
#[derive(Default)]
pub struct FormatRegistry {
    entries: BTreeMap<RegistryKey, FormatEntry>,
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for ((format, kind), entry) in &self.entries {
            map.entry(
                &format!("{format}/{kind}"),
                &format!(
                    "reader={} writer={} identifier={}",
                    entry.reader.is_some(),
                    entry.writer.is_some(),
                    entry.identifier.is_some()
                ),
            );
        }
        map.finish()
    }
}

fn key(format: &str, kind: SeriesKind) -> RegistryKey {
    (format.to_lowercase(), kind)
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in formats configured by
    /// `config`: `gif` for every kind plus the text formats `txt` and `csv`.
    pub fn with_default_formats(config: &GifConfig) -> Result<Self> {
        let mut registry = Self::new();
        super::formats::gif::register_default_formats(&mut registry, config)?;
        Ok(registry)
    }

    fn entry(&mut self, format: &str, kind: SeriesKind) -> &mut FormatEntry {
        self.entries.entry(key(format, kind)).or_default()
    }

    /// Register a reader, replacing any existing one.
    ///
    /// Returns `true` if a previous reader was replaced.
    pub fn register_reader<R>(&mut self, format: &str, kind: SeriesKind, reader: R) -> bool
    where
        R: SeriesReader + 'static,
    {
        let replaced = self.entry(format, kind).reader.replace(Arc::new(reader)).is_some();
        log_registration(format, kind, "reader", replaced);
        replaced
    }

    /// Register a writer, replacing any existing one.
    ///
    /// Returns `true` if a previous writer was replaced.
    pub fn register_writer<W>(&mut self, format: &str, kind: SeriesKind, writer: W) -> bool
    where
        W: SeriesWriter + 'static,
    {
        let replaced = self.entry(format, kind).writer.replace(Arc::new(writer)).is_some();
        log_registration(format, kind, "writer", replaced);
        replaced
    }

    /// Register an identifier, replacing any existing one.
    ///
    /// Returns `true` if a previous identifier was replaced.
    pub fn register_identifier<I>(&mut self, format: &str, kind: SeriesKind, identifier: I) -> bool
    where
        I: FormatIdentifier + 'static,
    {
        let replaced = self
            .entry(format, kind)
            .identifier
            .replace(Arc::new(identifier))
            .is_some();
        log_registration(format, kind, "identifier", replaced);
        replaced
    }

    /// Register a reader, failing if one is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::DuplicateRegistration`] if the slot is taken.
    pub fn try_register_reader<R>(&mut self, format: &str, kind: SeriesKind, reader: R) -> Result<()>
    where
        R: SeriesReader + 'static,
    {
        if self.has_reader(format, kind) {
            return Err(GifError::duplicate(format, kind.as_str(), "reader"));
        }
        self.register_reader(format, kind, reader);
        Ok(())
    }

    /// Register a writer, failing if one is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::DuplicateRegistration`] if the slot is taken.
    pub fn try_register_writer<W>(&mut self, format: &str, kind: SeriesKind, writer: W) -> Result<()>
    where
        W: SeriesWriter + 'static,
    {
        if self.has_writer(format, kind) {
            return Err(GifError::duplicate(format, kind.as_str(), "writer"));
        }
        self.register_writer(format, kind, writer);
        Ok(())
    }

    fn get(&self, format: &str, kind: SeriesKind) -> Option<&FormatEntry> {
        self.entries.get(&key(format, kind))
    }

    /// Check if a reader is registered.
    pub fn has_reader(&self, format: &str, kind: SeriesKind) -> bool {
        self.get(format, kind).is_some_and(|e| e.reader.is_some())
    }

    /// Check if a writer is registered.
    pub fn has_writer(&self, format: &str, kind: SeriesKind) -> bool {
        self.get(format, kind).is_some_and(|e| e.writer.is_some())
    }

    /// Check if an identifier is registered.
    pub fn has_identifier(&self, format: &str, kind: SeriesKind) -> bool {
        self.get(format, kind).is_some_and(|e| e.identifier.is_some())
    }

    /// Format names with at least one callable registered for `kind`, sorted.
    pub fn formats(&self, kind: SeriesKind) -> Vec<String> {
        self.entries
            .keys()
            .filter(|(_, k)| *k == kind)
            .map(|(format, _)| format.clone())
            .collect()
    }

    /// Read `path` with the reader registered for `(format, kind)`.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::UnknownFormat`] if no reader is registered, or
    /// whatever the reader returns.
    pub fn read<P: AsRef<Path>>(
        &self,
        format: &str,
        kind: SeriesKind,
        path: P,
        options: &ReadOptions,
    ) -> Result<Series> {
        let reader = self
            .get(format, kind)
            .and_then(|e| e.reader.clone())
            .ok_or_else(|| GifError::unknown_format(format, kind.as_str(), "reader"))?;
        debug!(format, %kind, path = %path.as_ref().display(), "dispatching read");
        reader.read(path.as_ref(), options)
    }

    /// Write `series` with the writer registered for its kind and `format`.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::UnknownFormat`] if no writer is registered, or
    /// whatever the writer returns.
    pub fn write<P: AsRef<Path>>(
        &self,
        format: &str,
        series: &Series,
        path: P,
        options: &WriteOptions,
    ) -> Result<()> {
        let kind = series.kind();
        let writer = self
            .get(format, kind)
            .and_then(|e| e.writer.clone())
            .ok_or_else(|| GifError::unknown_format(format, kind.as_str(), "writer"))?;
        debug!(format, %kind, path = %path.as_ref().display(), "dispatching write");
        writer.write(series, path.as_ref(), options)
    }

    /// Every format whose identifier for `kind` matches `path`, sorted.
    pub fn identify<P: AsRef<Path>>(&self, kind: SeriesKind, path: P) -> Vec<String> {
        let path = path.as_ref();
        self.entries
            .iter()
            .filter(|((_, k), _)| *k == kind)
            .filter(|(_, entry)| entry.identifier.as_ref().is_some_and(|i| i.identify(path)))
            .map(|((format, _), _)| format.clone())
            .collect()
    }

    /// Identify the format of `path` and read it.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::UnknownFormat`] if no identifier matches and
    /// [`GifError::AmbiguousFormat`] if several do.
    pub fn read_auto<P: AsRef<Path>>(
        &self,
        kind: SeriesKind,
        path: P,
        options: &ReadOptions,
    ) -> Result<Series> {
        let path = path.as_ref();
        let mut matches = self.identify(kind, path);
        match matches.len() {
            0 => Err(GifError::unknown_format(
                path.display().to_string(),
                kind.as_str(),
                "identifier",
            )),
            1 => {
                let format = matches.remove(0);
                self.read(&format, kind, path, options)
            }
            _ => Err(GifError::AmbiguousFormat {
                path: path.display().to_string(),
                formats: matches,
            }),
        }
    }
}

fn log_registration(format: &str, kind: SeriesKind, role: &str, replaced: bool) {
    if replaced {
        warn!(format, %kind, role, "replacing previously registered {role}");
    } else {
        info!(format, %kind, role, "registered {role}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_reader(value: f64) -> impl Fn(&Path, &ReadOptions) -> Result<Series> {
        move |_path: &Path, _options: &ReadOptions| {
            Series::new(SeriesKind::TimeSeries, vec![value; 4], 0.0, 1.0)
        }
    }

    #[test]
    fn test_register_and_read() {
        let mut registry = FormatRegistry::new();
        assert!(!registry.register_reader("mock", SeriesKind::TimeSeries, constant_reader(1.0)));
        assert!(registry.has_reader("mock", SeriesKind::TimeSeries));
        assert!(registry.has_reader("MOCK", SeriesKind::TimeSeries));
        assert!(!registry.has_reader("mock", SeriesKind::StateVector));

        let series = registry
            .read("mock", SeriesKind::TimeSeries, "x", &ReadOptions::new())
            .unwrap();
        assert_eq!(series.values(), &[1.0; 4]);
    }

    #[test]
    fn test_second_registration_replaces_first() {
        let mut registry = FormatRegistry::new();
        registry.register_reader("mock", SeriesKind::TimeSeries, constant_reader(1.0));
        assert!(registry.register_reader("mock", SeriesKind::TimeSeries, constant_reader(2.0)));

        let series = registry
            .read("mock", SeriesKind::TimeSeries, "x", &ReadOptions::new())
            .unwrap();
        assert_eq!(series.values(), &[2.0; 4]);
    }

    #[test]
    fn test_try_register_refuses_duplicates() {
        let mut registry = FormatRegistry::new();
        registry
            .try_register_reader("mock", SeriesKind::TimeSeries, constant_reader(1.0))
            .unwrap();
        let err = registry
            .try_register_reader("mock", SeriesKind::TimeSeries, constant_reader(2.0))
            .unwrap_err();
        assert!(matches!(err, GifError::DuplicateRegistration { .. }));

        let noop = |_: &Series, _: &Path, _: &WriteOptions| -> Result<()> { Ok(()) };
        registry.try_register_writer("mock", SeriesKind::TimeSeries, noop).unwrap();
        assert!(registry.try_register_writer("mock", SeriesKind::TimeSeries, noop).is_err());
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::new();
        let err = registry
            .read("nope", SeriesKind::TimeSeries, "x", &ReadOptions::new())
            .unwrap_err();
        assert!(matches!(err, GifError::UnknownFormat { .. }));

        let series = Series::new(SeriesKind::TimeSeries, vec![], 0.0, 1.0).unwrap();
        let err = registry
            .write("nope", &series, "x", &WriteOptions::new())
            .unwrap_err();
        assert!(matches!(err, GifError::UnknownFormat { .. }));
    }

    #[test]
    fn test_identify_and_read_auto() {
        let mut registry = FormatRegistry::new();
        registry.register_reader("a", SeriesKind::TimeSeries, constant_reader(1.0));
        registry.register_identifier("a", SeriesKind::TimeSeries, |p: &Path| {
            p.extension().is_some_and(|e| e == "a")
        });
        registry.register_reader("b", SeriesKind::TimeSeries, constant_reader(2.0));
        registry.register_identifier("b", SeriesKind::TimeSeries, |p: &Path| {
            p.extension().is_some_and(|e| e == "a" || e == "b")
        });

        assert_eq!(registry.identify(SeriesKind::TimeSeries, "f.b"), vec!["b"]);
        assert_eq!(registry.identify(SeriesKind::TimeSeries, "f.a"), vec!["a", "b"]);
        assert!(registry.identify(SeriesKind::StateVector, "f.a").is_empty());

        let series = registry
            .read_auto(SeriesKind::TimeSeries, "f.b", &ReadOptions::new())
            .unwrap();
        assert_eq!(series.values()[0], 2.0);

        let err = registry
            .read_auto(SeriesKind::TimeSeries, "f.a", &ReadOptions::new())
            .unwrap_err();
        assert!(matches!(err, GifError::AmbiguousFormat { .. }));

        let err = registry
            .read_auto(SeriesKind::TimeSeries, "f.c", &ReadOptions::new())
            .unwrap_err();
        assert!(matches!(err, GifError::UnknownFormat { .. }));
    }

    #[test]
    fn test_formats_listing() {
        let mut registry = FormatRegistry::new();
        registry.register_reader("zeta", SeriesKind::TimeSeries, constant_reader(1.0));
        registry.register_reader("alpha", SeriesKind::TimeSeries, constant_reader(1.0));
        registry.register_reader("beta", SeriesKind::StateVector, constant_reader(1.0));
        assert_eq!(registry.formats(SeriesKind::TimeSeries), vec!["alpha", "zeta"]);
        assert_eq!(registry.formats(SeriesKind::StateVector), vec!["beta"]);
    }

    #[test]
    fn test_concurrent_reads() {
        use std::thread;

        let mut registry = FormatRegistry::new();
        registry.register_reader("mock", SeriesKind::TimeSeries, constant_reader(3.0));
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        let series = registry
                            .read("mock", SeriesKind::TimeSeries, "x", &ReadOptions::new())
                            .unwrap();
                        assert_eq!(series.len(), 4);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
