// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Channel sample-rate registry.
//!
//! Maps channel names (e.g. `"K1:PEM-EX_SEIS_X"`) to their sample rate in
//! Hz. Readers consult it when options name a channel instead of giving a
//! fixed rate.

use std::collections::BTreeMap;

use super::error::{GifError, Result};

/// Registry of channel sample rates.
///
/// Built once (usually from [`GifConfig`](crate::config::GifConfig)) and
/// then shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelRates {
    rates: BTreeMap<String, f64>,
}

impl ChannelRates {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the sample rate of a channel.
    ///
    /// Returns the previously registered rate, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::Configuration`] if `rate` is not a positive finite
    /// number.
    pub fn insert(&mut self, channel: impl Into<String>, rate: f64) -> Result<Option<f64>> {
        let channel = channel.into();
        if !(rate.is_finite() && rate > 0.0) {
            return Err(GifError::configuration(format!(
                "sample rate of channel '{channel}' must be positive, got {rate}"
            )));
        }
        Ok(self.rates.insert(channel, rate))
    }

    /// Get the sample rate of a channel.
    pub fn get(&self, channel: &str) -> Option<f64> {
        self.rates.get(channel).copied()
    }

    /// Get the sample rate of a channel or fail with a configuration error.
    pub fn require(&self, channel: &str) -> Result<f64> {
        self.get(channel).ok_or_else(|| {
            GifError::configuration(format!("no sample rate registered for channel '{channel}'"))
        })
    }

    /// Check if a channel is registered.
    pub fn contains(&self, channel: &str) -> bool {
        self.rates.contains_key(channel)
    }

    /// Registered channel names, sorted.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Get the number of registered channels.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ChannelRates {
    type Error = GifError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        let mut rates = ChannelRates::new();
        for (channel, rate) in map {
            rates.insert(channel, rate)?;
        }
        Ok(rates)
    }
}
