// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Uniformly sampled one-dimensional series.
//!
//! A [`Series`] owns its samples and the timing metadata needed to place
//! them on the GPS time axis: an origin `x0`, a fixed spacing `dx`, and
//! optionally an explicit per-sample index. Missing data is represented by
//! `NaN` samples so ordinary `f64::is_nan` checks find the gaps.

use std::fmt;
use std::str::FromStr;

use super::error::{GifError, Result};
use crate::signal::decimate::decimate;

/// Unit attached to GIF strain data when nothing else is configured.
pub const DEFAULT_UNIT: &str = "strain";

/// Kind of series a reader produces; the second key of the format registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKind {
    /// Continuous time series
    TimeSeries,
    /// State vector (sampled status words)
    StateVector,
}

impl SeriesKind {
    /// All known kinds.
    pub const ALL: [SeriesKind; 2] = [SeriesKind::TimeSeries, SeriesKind::StateVector];

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::TimeSeries => "timeseries",
            SeriesKind::StateVector => "statevector",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a `SeriesKind` from string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeriesKindError(String);

impl fmt::Display for ParseSeriesKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid series kind '{}', expected 'timeseries' or 'statevector'",
            self.0
        )
    }
}

impl std::error::Error for ParseSeriesKindError {}

impl FromStr for SeriesKind {
    type Err = ParseSeriesKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timeseries" | "time_series" => Ok(SeriesKind::TimeSeries),
            "statevector" | "state_vector" => Ok(SeriesKind::StateVector),
            _ => Err(ParseSeriesKindError(s.to_string())),
        }
    }
}

/// A sampled series with GPS timing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    kind: SeriesKind,
    values: Vec<f64>,
    x0: f64,
    dx: f64,
    xindex: Option<Vec<f64>>,
    unit: String,
    name: Option<String>,
    channel: Option<String>,
}

impl Series {
    /// Create a regularly sampled series starting at GPS time `x0` with
    /// sample spacing `dx` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::InvalidSeries`] if `dx` is not a positive finite
    /// number or `x0` is not finite.
    pub fn new(kind: SeriesKind, values: Vec<f64>, x0: f64, dx: f64) -> Result<Self> {
        if !(dx.is_finite() && dx > 0.0) {
            return Err(GifError::invalid_series(format!(
                "sample spacing must be positive and finite, got {dx}"
            )));
        }
        if !x0.is_finite() {
            return Err(GifError::invalid_series(format!(
                "start time must be finite, got {x0}"
            )));
        }
        Ok(Self {
            kind,
            values,
            x0,
            dx,
            xindex: None,
            unit: DEFAULT_UNIT.to_string(),
            name: None,
            channel: None,
        })
    }

    /// Attach an explicit per-sample index.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::InvalidSeries`] if the index length differs from
    /// the number of samples.
    pub fn with_xindex(mut self, xindex: Vec<f64>) -> Result<Self> {
        if xindex.len() != self.values.len() {
            return Err(GifError::invalid_series(format!(
                "index has {} entries but series has {} samples",
                xindex.len(),
                self.values.len()
            )));
        }
        self.xindex = Some(xindex);
        Ok(self)
    }

    /// Attach an index computed from `x0` and `dx`.
    pub fn with_regular_xindex(mut self) -> Self {
        self.xindex = Some(self.regular_times().collect());
        self
    }

    /// Set the physical unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the channel label.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the series and return its samples.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// GPS time of the first sample.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Sample spacing in seconds.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn xindex(&self) -> Option<&[f64]> {
        self.xindex.as_deref()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dx
    }

    /// Covered time in seconds (`len * dx`).
    pub fn duration(&self) -> f64 {
        self.values.len() as f64 * self.dx
    }

    /// Half-open GPS interval `[x0, x0 + duration)` covered by the samples.
    pub fn span(&self) -> (f64, f64) {
        (self.x0, self.x0 + self.duration())
    }

    fn regular_times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.values.len()).map(move |i| self.x0 + i as f64 * self.dx)
    }

    /// Time of every sample: the explicit index when present, otherwise
    /// `x0 + i * dx`.
    pub fn times(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match &self.xindex {
            Some(index) => Box::new(index.iter().copied()),
            None => Box::new(self.regular_times()),
        }
    }

    /// Number of samples carrying the no-data marker (`NaN`).
    pub fn gap_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Whether any sample is `NaN`.
    pub fn has_gaps(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Keep only samples with `start <= t < end`.
    ///
    /// Either bound may be omitted. Cropping the front moves `x0` to the
    /// first kept sample.
    pub fn crop(self, start: Option<f64>, end: Option<f64>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if e <= s {
                return Err(GifError::configuration(format!(
                    "crop end {e} must be after start {s}"
                )));
            }
        }

        let n = self.values.len();
        let first = match start {
            Some(s) if s > self.x0 => (((s - self.x0) / self.dx).ceil() as usize).min(n),
            _ => 0,
        };
        let last = match end {
            Some(e) if e < self.x0 => 0,
            Some(e) => (((e - self.x0) / self.dx).ceil() as usize).min(n),
            None => n,
        };
        let last = last.max(first);

        let Series {
            kind,
            values,
            x0,
            dx,
            xindex,
            unit,
            name,
            channel,
        } = self;

        Ok(Series {
            kind,
            values: values[first..last].to_vec(),
            x0: x0 + first as f64 * dx,
            dx,
            xindex: xindex.map(|index| index[first..last].to_vec()),
            unit,
            name,
            channel,
        })
    }

    /// Downsample by an integer factor with anti-alias filtering.
    ///
    /// The spacing becomes `factor * dx`; an explicit index is rebuilt from
    /// the new spacing.
    pub fn decimate(self, factor: usize) -> Result<Self> {
        let values = decimate(&self.values, factor)?;
        let had_index = self.xindex.is_some();
        let decimated = Series {
            values,
            dx: self.dx * factor as f64,
            xindex: None,
            ..self
        };
        Ok(if had_index {
            decimated.with_regular_xindex()
        } else {
            decimated
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_series_kind_from_str() {
        assert_eq!("timeseries".parse::<SeriesKind>(), Ok(SeriesKind::TimeSeries));
        assert_eq!("StateVector".parse::<SeriesKind>(), Ok(SeriesKind::StateVector));
        assert!("spectrum".parse::<SeriesKind>().is_err());
        assert_eq!(SeriesKind::TimeSeries.to_string(), "timeseries");
    }

    #[test]
    fn test_new_rejects_bad_spacing() {
        assert!(Series::new(SeriesKind::TimeSeries, vec![], 0.0, 0.0).is_err());
        assert!(Series::new(SeriesKind::TimeSeries, vec![], 0.0, -1.0).is_err());
        assert!(Series::new(SeriesKind::TimeSeries, vec![], 0.0, f64::NAN).is_err());
        assert!(Series::new(SeriesKind::TimeSeries, vec![], f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_span_matches_rate() {
        let series = Series::new(SeriesKind::TimeSeries, ramp(400), 100.0, 1.0 / 200.0).unwrap();
        assert_eq!(series.len(), 400);
        assert_eq!(series.sample_rate(), 200.0);
        assert!((series.duration() - 2.0).abs() < 1e-12);
        let (start, end) = series.span();
        assert_eq!(start, 100.0);
        assert!((end - 102.0).abs() < 1e-9);
        assert_eq!(series.times().next(), Some(100.0));
        assert_eq!(series.unit(), DEFAULT_UNIT);
    }

    #[test]
    fn test_explicit_index_length_checked() {
        let series = Series::new(SeriesKind::TimeSeries, ramp(3), 0.0, 1.0).unwrap();
        assert!(series.clone().with_xindex(vec![0.0, 1.0]).is_err());

        let series = series.with_xindex(vec![5.0, 6.0, 7.5]).unwrap();
        assert_eq!(series.times().collect::<Vec<_>>(), vec![5.0, 6.0, 7.5]);
    }

    #[test]
    fn test_regular_xindex() {
        let series = Series::new(SeriesKind::StateVector, ramp(4), 10.0, 0.5)
            .unwrap()
            .with_regular_xindex();
        assert_eq!(series.xindex(), Some(&[10.0, 10.5, 11.0, 11.5][..]));
    }

    #[test]
    fn test_metadata_builders() {
        let series = Series::new(SeriesKind::TimeSeries, ramp(1), 0.0, 1.0)
            .unwrap()
            .with_unit("m")
            .with_name("seismometer")
            .with_channel("K1:PEM-EX_SEIS_X");
        assert_eq!(series.unit(), "m");
        assert_eq!(series.name(), Some("seismometer"));
        assert_eq!(series.channel(), Some("K1:PEM-EX_SEIS_X"));
    }

    #[test]
    fn test_gap_count() {
        let series =
            Series::new(SeriesKind::TimeSeries, vec![1.0, f64::NAN, 2.0, f64::NAN], 0.0, 1.0)
                .unwrap();
        assert_eq!(series.gap_count(), 2);
        assert!(series.has_gaps());
    }

    #[test]
    fn test_crop() {
        let series = Series::new(SeriesKind::TimeSeries, ramp(10), 100.0, 1.0).unwrap();
        let cropped = series.clone().crop(Some(102.0), Some(105.0)).unwrap();
        assert_eq!(cropped.values(), &[2.0, 3.0, 4.0]);
        assert_eq!(cropped.x0(), 102.0);

        let tail = series.clone().crop(None, Some(103.5)).unwrap();
        assert_eq!(tail.len(), 4);

        let empty = series.clone().crop(Some(200.0), None).unwrap();
        assert!(empty.is_empty());

        assert!(series.crop(Some(105.0), Some(105.0)).is_err());
    }

    #[test]
    fn test_crop_keeps_index_aligned() {
        let series = Series::new(SeriesKind::TimeSeries, ramp(6), 0.0, 1.0)
            .unwrap()
            .with_regular_xindex();
        let cropped = series.crop(Some(2.0), None).unwrap();
        assert_eq!(cropped.xindex(), Some(&[2.0, 3.0, 4.0, 5.0][..]));
    }

    #[test]
    fn test_decimate_updates_spacing() {
        let series = Series::new(SeriesKind::TimeSeries, vec![1.0; 1000], 0.0, 1.0 / 200.0)
            .unwrap()
            .with_regular_xindex();
        let decimated = series.decimate(25).unwrap();
        assert_eq!(decimated.len(), 40);
        assert!((decimated.sample_rate() - 8.0).abs() < 1e-9);
        assert_eq!(decimated.xindex().map(|x| x.len()), Some(40));
        assert_eq!(decimated.x0(), 0.0);
    }
}
