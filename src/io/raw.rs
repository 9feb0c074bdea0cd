// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Raw sample files: flat native-endian `f64` arrays with no header.
//!
//! Reading memory-maps the file and reinterprets the mapping as `f64`s.
//! The mapping and the file handle are owned by [`RawSampleFile`] and
//! released when it is dropped, on success and error paths alike.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gifseries::io::raw::RawSampleFile;
//!
//! let file = RawSampleFile::open("2304151230.dat")?;
//! println!("{} samples", file.sample_count());
//! let samples: Vec<f64> = file.to_vec();
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::mem::size_of;
use std::path::Path;

use byteorder::{ByteOrder, NativeEndian, WriteBytesExt};

use crate::core::error::{GifError, Result};

const SAMPLE_SIZE: usize = size_of::<f64>();

/// A memory-mapped raw sample file.
pub struct RawSampleFile {
    /// The memory-mapped file, `None` for an empty file
    mmap: Option<memmap2::Mmap>,
    /// File path for diagnostics
    path: String,
}

impl RawSampleFile {
    /// Open and map a raw sample file.
    ///
    /// # Errors
    ///
    /// Returns [`GifError::Io`] if the file cannot be opened, inspected or
    /// mapped, and [`GifError::Parse`] if its length is not a whole number
    /// of samples.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref)
            .map_err(|e| GifError::io(&path_str, format!("failed to open file: {e}")))?;
        let size = file
            .metadata()
            .map_err(|e| GifError::io(&path_str, format!("failed to stat file: {e}")))?
            .len();

        if size % SAMPLE_SIZE as u64 != 0 {
            return Err(GifError::parse(
                "raw samples",
                format!("'{path_str}' is {size} bytes, not a multiple of {SAMPLE_SIZE}"),
            ));
        }

        // Zero-length files cannot be mapped on every platform.
        if size == 0 {
            return Ok(Self {
                mmap: None,
                path: path_str,
            });
        }

        // The mapping is owned by this value and only lent out as slices
        // tied to its lifetime.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| GifError::io(&path_str, format!("failed to mmap file: {e}")))?;

        Ok(Self {
            mmap: Some(mmap),
            path: path_str,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw bytes of the file.
    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Number of samples in the file.
    pub fn sample_count(&self) -> usize {
        self.bytes().len() / SAMPLE_SIZE
    }

    /// Copy the samples out of the mapping.
    pub fn to_vec(&self) -> Vec<f64> {
        let bytes = self.bytes();
        match bytemuck::try_cast_slice::<u8, f64>(bytes) {
            Ok(samples) => samples.to_vec(),
            Err(_) => {
                let mut samples = vec![0.0; bytes.len() / SAMPLE_SIZE];
                NativeEndian::read_f64_into(bytes, &mut samples);
                samples
            }
        }
    }
}

/// Read every sample of a raw file.
pub fn read_raw_samples<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    RawSampleFile::open(path).map(|file| file.to_vec())
}

/// Write samples as a raw native-endian `f64` file, replacing any existing
/// file.
pub fn write_raw_samples<P: AsRef<Path>>(path: P, samples: &[f64]) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();
    let to_io = |e: std::io::Error| GifError::io(path_str.clone(), e.to_string());

    let mut writer = BufWriter::new(File::create(path_ref).map_err(to_io)?);
    for &sample in samples {
        writer.write_f64::<NativeEndian>(sample).map_err(to_io)?;
    }
    writer.flush().map_err(to_io)
}
