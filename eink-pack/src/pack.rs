// SPDX-License-Identifier: MIT
//! # 4-bit Nibble Packing
//!
//! The panel controller reads 16 gray levels, two pixels per byte:
//!
//! ```text
//!   byte  = (level[i + 1] << 4) | level[i]
//!           └ odd pixel ┘        └ even pixel ┘
//! ```
//!
//! Pixels are taken in row-major scan order, so the buffer carries no row padding
//! and no embedded dimensions. Callers report width and height out of band.

use crate::bitmap::Bitmap;
use crate::error::PrepError;
use crate::presets::Size;

/// Number of gray levels the controller can draw.
pub const GRAY_LEVELS: u8 = 16;

/// Mapping from an 8-bit sample to a 4-bit gray level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Quantization {
    /// `sample / 16`: lossy linear downscale keeping all 16 levels.
    #[default]
    Linear,
    /// Pure black/white: samples above `cutoff` become 15, the rest 0.
    Threshold { cutoff: u8 },
}

impl Quantization {
    #[inline]
    pub fn level(self, sample: u8) -> u8 {
        match self {
            Quantization::Linear => sample / GRAY_LEVELS,
            Quantization::Threshold { cutoff } => {
                if sample > cutoff {
                    GRAY_LEVELS - 1
                } else {
                    0
                }
            }
        }
    }
}

/// Packed 4-bit framebuffer contents paired with the dimensions it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBuffer {
    size: Size,
    bytes: Vec<u8>,
}

impl PackedBuffer {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.w
    }

    pub fn height(&self) -> u32 {
        self.size.h
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Expand each nibble back to an 8-bit sample (`level * 16`).
    pub fn unpack(&self) -> Vec<u8> {
        self.bytes
            .iter()
            .flat_map(|&b| [(b & 0x0F) * GRAY_LEVELS, (b >> 4) * GRAY_LEVELS])
            .collect()
    }
}

/// Pack `bitmap` with linear quantization.
pub fn pack(bitmap: &Bitmap) -> Result<PackedBuffer, PrepError> {
    pack_with(bitmap, Quantization::Linear)
}

/// Pack `bitmap`, two pixels per byte, using `quantization` for each sample.
///
/// # Errors
/// [`PrepError::OddPixelCount`] when `width * height` is odd.
pub fn pack_with(bitmap: &Bitmap, quantization: Quantization) -> Result<PackedBuffer, PrepError> {
    let size = bitmap.size();
    if size.pixels() % 2 != 0 {
        return Err(PrepError::OddPixelCount { w: size.w, h: size.h });
    }

    let bytes = bitmap
        .as_slice()
        .chunks_exact(2)
        .map(|pair| (quantization.level(pair[1]) << 4) | quantization.level(pair[0]))
        .collect();

    Ok(PackedBuffer { size, bytes })
}
