// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use gifseries::io::raw::write_raw_samples;

// ============================================================================
// Temporary Files
// ============================================================================

/// GPS time of 2023-04-15 12:30 at UTC+9.
pub const STAMP_GPS: f64 = 1_365_564_618.0;

/// File name whose prefix encodes [`STAMP_GPS`].
pub const STAMPED_NAME: &str = "2304151230.gif";

/// A per-test temporary directory, removed on drop.
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new(label: &str) -> Self {
        let random = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        let dir = std::env::temp_dir().join(format!(
            "gifseries_{}_{}_{}",
            label,
            std::process::id(),
            random
        ));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Write a raw sample file named `name` inside `dir`.
pub fn write_fixture(dir: &TempDir, name: &str, samples: &[f64]) -> PathBuf {
    let path = dir.join(name);
    write_raw_samples(&path, samples).unwrap();
    path
}

/// A slow sine wave sampled at `rate` for `count` samples.
pub fn sine(count: usize, rate: f64, freq: f64) -> Vec<f64> {
    (0..count)
        .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / rate).sin())
        .collect()
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert `a` and `b` agree within `tol` relative to their magnitude.
pub fn assert_close(a: f64, b: f64, tol: f64) {
    let scale = a.abs().max(b.abs()).max(1.0);
    assert!(
        (a - b).abs() <= tol * scale,
        "{a} and {b} differ by more than {tol} (relative)"
    );
}
