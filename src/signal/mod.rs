// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Signal processing applied during ingestion.

pub mod decimate;

pub use decimate::{decimate, decimation_factor, lowpass_taps};
