// SPDX-License-Identifier: MIT
use fast_image_resize as fir;
use thiserror::Error;

use crate::presets::Size;

/// Failures raised while preparing a bitmap for the panel.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A width or height was zero, or a bounding-box dimension was zero or odd.
    #[error("invalid dimension: {what} (got {w}x{h})")]
    InvalidDimension { what: &'static str, w: u32, h: u32 },

    /// Two pixels share a byte, so a trailing unpaired pixel has no encoding.
    #[error("odd pixel count: {w}x{h} cannot be packed two pixels per byte")]
    OddPixelCount { w: u32, h: u32 },

    #[error("bitmap buffer holds {actual} samples, expected {expected} for {size}")]
    BufferLength {
        size: Size,
        expected: usize,
        actual: usize,
    },

    #[error("fast image resize error: {0}")]
    Resize(#[from] fir::ResizeError),

    #[error("image buffer error: {0}")]
    ImageBuffer(#[from] fir::ImageBufferError),
}
