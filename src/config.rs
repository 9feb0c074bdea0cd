// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TOML configuration.
//!
//! ```toml
//! utc_offset_hours = 9
//! unit = "strain"
//! fill_missing = false
//! gap_duration = 60.0
//! decimate_to = 8.0
//!
//! [channels]
//! "K1:PEM-EX_SEIS_X" = 200.0
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that a typo does not
//! silently fall back to a default.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{GifError, Result};
use crate::core::registry::ChannelRates;
use crate::core::series::DEFAULT_UNIT;
use crate::core::time::DEFAULT_UTC_OFFSET_HOURS;
use crate::io::options::{GapPolicy, IndexMode, ReadOptions, DEFAULT_GAP_DURATION};

/// Library configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifConfig {
    /// Offset of the clock that names the data files, in hours east of UTC
    pub utc_offset_hours: i32,
    pub unit: String,
    /// Substitute `NaN` for unreadable files instead of failing
    pub fill_missing: bool,
    /// Seconds of `NaN` substituted per missing file
    pub gap_duration: f64,
    pub decimate_to: Option<f64>,
    /// Fallback rate for reads that name no channel
    pub sample_rate: Option<f64>,
    pub explicit_index: bool,
    /// Extensions identified as the `gif` format
    pub extensions: Vec<String>,
    /// Channel name to sample rate in Hz
    pub channels: BTreeMap<String, f64>,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            unit: DEFAULT_UNIT.to_string(),
            fill_missing: false,
            gap_duration: DEFAULT_GAP_DURATION,
            decimate_to: None,
            sample_rate: None,
            explicit_index: false,
            extensions: vec!["gif".to_string()],
            channels: BTreeMap::new(),
        }
    }
}

impl GifConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| GifError::configuration(format!("invalid configuration: {e}")))
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GifError::configuration(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Channel rates declared in `[channels]`.
    pub fn channel_rates(&self) -> Result<ChannelRates> {
        ChannelRates::try_from(self.channels.clone())
    }

    /// Read options carrying the configured policies, suitable as
    /// registration defaults.
    pub fn read_defaults(&self) -> ReadOptions {
        let gap_policy = if self.fill_missing {
            GapPolicy::FillMissing {
                duration: self.gap_duration,
            }
        } else {
            GapPolicy::Strict
        };
        let index_mode = if self.explicit_index {
            IndexMode::Explicit
        } else {
            IndexMode::Regular
        };

        ReadOptions {
            sample_rate: self.sample_rate,
            unit: Some(self.unit.clone()),
            utc_offset_hours: Some(self.utc_offset_hours),
            gap_policy: Some(gap_policy),
            decimate_to: self.decimate_to,
            index_mode: Some(index_mode),
            ..ReadOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = GifConfig::from_toml_str("").unwrap();
        assert_eq!(config, GifConfig::default());
        assert_eq!(config.utc_offset_hours, 9);
        assert_eq!(config.read_defaults().gap_policy, Some(GapPolicy::Strict));
    }

    #[test]
    fn test_full_config() {
        let config = GifConfig::from_toml_str(
            r#"
            utc_offset_hours = 0
            unit = "m"
            fill_missing = true
            gap_duration = 30.0
            decimate_to = 8.0
            explicit_index = true
            extensions = ["gif", "dat"]

            [channels]
            "K1:PEM-EX_SEIS_X" = 200.0
            "K1:GIF-X" = 1000.0
            "#,
        )
        .unwrap();

        let rates = config.channel_rates().unwrap();
        assert_eq!(rates.get("K1:GIF-X"), Some(1000.0));
        assert_eq!(rates.len(), 2);

        let defaults = config.read_defaults();
        assert_eq!(defaults.utc_offset_hours, Some(0));
        assert_eq!(defaults.unit.as_deref(), Some("m"));
        assert_eq!(defaults.gap_policy, Some(GapPolicy::FillMissing { duration: 30.0 }));
        assert_eq!(defaults.decimate_to, Some(8.0));
        assert_eq!(defaults.index_mode, Some(IndexMode::Explicit));
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_rates() {
        let err = GifConfig::from_toml_str("fil_missing = true").unwrap_err();
        assert!(matches!(err, GifError::Configuration { .. }));

        let config = GifConfig::from_toml_str("[channels]\n\"K1:X\" = -1.0\n").unwrap();
        assert!(config.channel_rates().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GifConfig::load("/nonexistent/gifseries.toml").unwrap_err();
        assert!(matches!(err, GifError::Configuration { .. }));
    }
}
