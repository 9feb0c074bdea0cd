// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File format implementations.
//!
//! - [`gif`]: GIF raw binary samples and the two-column text form

pub mod gif;
