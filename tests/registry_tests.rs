// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format registry integration tests.
//!
//! Tests cover:
//! - Default formats built from a TOML configuration
//! - Registration overwrite and strict registration
//! - Identification and automatic dispatch

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{write_fixture, TempDir, STAMPED_NAME, STAMP_GPS};

use gifseries::core::registry::ChannelRates;
use gifseries::io::formats::gif::{register_gif_series_io, FormatDefaults};
use gifseries::{
    FormatRegistry, GifConfig, GifError, ReadOptions, Result, Series, SeriesKind, WriteOptions,
};

const CONFIG: &str = r#"
fill_missing = true
decimate_to = 8.0
extensions = ["gif", "dat"]

[channels]
"K1:PEM-EX_SEIS_X" = 200.0
"#;

// ============================================================================
// Default Formats
// ============================================================================

#[test]
fn test_default_registry_from_config() {
    let config = GifConfig::from_toml_str(CONFIG).unwrap();
    let registry = FormatRegistry::with_default_formats(&config).unwrap();

    for kind in SeriesKind::ALL {
        for format in ["gif", "txt", "csv"] {
            assert!(registry.has_reader(format, kind), "{format} reader for {kind}");
            assert!(registry.has_writer(format, kind), "{format} writer for {kind}");
        }
    }
    assert_eq!(registry.identify(SeriesKind::TimeSeries, "2304151230.dat"), vec!["gif"]);
}

#[test]
fn test_default_gif_reader_uses_config_policies() {
    let config = GifConfig::from_toml_str(CONFIG).unwrap();
    let registry = FormatRegistry::with_default_formats(&config).unwrap();
    let dir = TempDir::new("registry_defaults");

    // Missing file: filled with a minute of NaN, then decimated to 8 Hz.
    let series = registry
        .read(
            "gif",
            SeriesKind::TimeSeries,
            dir.join(STAMPED_NAME),
            &ReadOptions::new().channel("K1:PEM-EX_SEIS_X"),
        )
        .unwrap();
    assert_eq!(series.len(), 480);
    assert!((series.sample_rate() - 8.0).abs() < 1e-9);
    assert_eq!(series.x0(), STAMP_GPS);
    assert!(series.has_gaps());

    // Call-time options win over the configured defaults.
    let path = write_fixture(&dir, STAMPED_NAME, &[1.0; 400]);
    let series = registry
        .read(
            "gif",
            SeriesKind::TimeSeries,
            &path,
            &ReadOptions::new().sample_rate(200.0).decimate_to(200.0),
        )
        .unwrap();
    assert_eq!(series.len(), 400);
}

#[test]
fn test_read_auto_dispatches_by_extension() {
    let config = GifConfig {
        sample_rate: Some(4.0),
        ..GifConfig::default()
    };
    let registry = Arc::new(FormatRegistry::with_default_formats(&config).unwrap());
    let dir = TempDir::new("registry_auto");

    let gif = write_fixture(&dir, STAMPED_NAME, &[1.0, 2.0, 3.0, 4.0]);
    let series = registry
        .read_auto(SeriesKind::StateVector, &gif, &ReadOptions::new())
        .unwrap();
    assert_eq!(series.kind(), SeriesKind::StateVector);
    assert_eq!(series.dx(), 0.25);

    let csv = dir.join("2304151230.csv");
    registry
        .write("csv", &series, &csv, &WriteOptions::new())
        .unwrap();
    let text = std::fs::read_to_string(&csv).unwrap();
    assert!(text.lines().all(|line| line.contains(',')));

    let back = registry
        .read_auto(SeriesKind::StateVector, &csv, &ReadOptions::new())
        .unwrap();
    assert_eq!(back.values(), series.values());

    let err = registry
        .read_auto(SeriesKind::StateVector, dir.join("2304151230.h5"), &ReadOptions::new())
        .unwrap_err();
    assert!(matches!(err, GifError::UnknownFormat { .. }));
}

// ============================================================================
// Overwrite
// ============================================================================

#[test]
fn test_second_registration_replaces_first() {
    let mut registry = FormatRegistry::new();
    register_gif_series_io(
        &mut registry,
        SeriesKind::TimeSeries,
        "gif",
        true,
        Arc::new(ChannelRates::new()),
        FormatDefaults::new(),
    );

    let replaced = registry.register_reader(
        "gif",
        SeriesKind::TimeSeries,
        |_path: &Path, _options: &ReadOptions| -> Result<Series> {
            Series::new(SeriesKind::TimeSeries, vec![42.0], 0.0, 1.0)
        },
    );
    assert!(replaced);

    let series = registry
        .read("gif", SeriesKind::TimeSeries, "anything.gif", &ReadOptions::new())
        .unwrap();
    assert_eq!(series.values(), &[42.0]);

    // The writer and identifier of the first registration survive.
    assert!(registry.has_writer("gif", SeriesKind::TimeSeries));
    assert_eq!(registry.identify(SeriesKind::TimeSeries, "x.gif"), vec!["gif"]);
}

#[test]
fn test_strict_registration_refuses_overwrite() {
    let mut registry = FormatRegistry::with_default_formats(&GifConfig::default()).unwrap();
    let err = registry
        .try_register_reader(
            "gif",
            SeriesKind::TimeSeries,
            |_path: &Path, _options: &ReadOptions| -> Result<Series> {
                Series::new(SeriesKind::TimeSeries, vec![], 0.0, 1.0)
            },
        )
        .unwrap_err();
    assert!(matches!(err, GifError::DuplicateRegistration { .. }));
}

#[test]
fn test_invalid_channel_rate_fails_registry_construction() {
    let config = GifConfig::from_toml_str("[channels]\n\"K1:BAD\" = 0.0\n").unwrap();
    let err = FormatRegistry::with_default_formats(&config).unwrap_err();
    assert!(matches!(err, GifError::Configuration { .. }));
}
