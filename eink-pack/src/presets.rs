// SPDX-License-Identifier: MIT
//! # Bounding Boxes and Fit Planning
//!
//! Computes the output size for a source bitmap shown on a fixed-resolution panel.
//!
//! ## Fit Rule
//!
//! The source aspect ratio is compared with the bounding box ratio:
//! - **Relatively taller** (`ratio < bound_ratio`): height becomes `max.h`,
//!   width is `floor(max.h * ratio)`.
//! - **Otherwise** (including an exact tie): width becomes `max.w`,
//!   height is `floor(max.w / ratio)`.
//!
//! The derived dimension is bumped by one when odd, so the packer always sees an
//! even pixel count. The box itself must have even dimensions, since one of its
//! sides is copied to the output unchanged.
//!
//! Upscaling is allowed: a small source is stretched to fit the box.

use crate::error::PrepError;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Total number of pixels, widened so large panels cannot overflow.
    pub fn pixels(self) -> usize {
        (self.w as usize) * (self.h as usize)
    }

    /// Width over height as a float.
    pub fn ratio(self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Smallest even dimension a plan can produce.
const MIN_DIMENSION: u32 = 2;

/// Fit `input` into the bounding box `max`, preserving aspect ratio, with both
/// output dimensions even.
///
/// # Errors
/// [`PrepError::InvalidDimension`] when either size has a zero dimension, or
/// when the bounding box has an odd dimension.
pub fn fit_even(input: Size, max: Size) -> Result<Size, PrepError> {
    if input.w == 0 || input.h == 0 {
        return Err(PrepError::InvalidDimension {
            what: "source bitmap",
            w: input.w,
            h: input.h,
        });
    }
    if max.w == 0 || max.h == 0 {
        return Err(PrepError::InvalidDimension {
            what: "bounding box",
            w: max.w,
            h: max.h,
        });
    }
    if max.w % 2 == 1 || max.h % 2 == 1 {
        return Err(PrepError::InvalidDimension {
            what: "bounding box (even)",
            w: max.w,
            h: max.h,
        });
    }

    let ratio = input.ratio();
    if ratio < max.ratio() {
        let w = round_up_even((max.h as f64 * ratio).floor());
        Ok(Size { w, h: max.h })
    } else {
        let h = round_up_even((max.w as f64 / ratio).floor());
        Ok(Size { w: max.w, h })
    }
}

// Extreme aspect ratios can floor to 0; clamp so the scaler gets a real target.
fn round_up_even(value: f64) -> u32 {
    let v = (value as u32).max(MIN_DIMENSION);
    if v % 2 == 1 { v + 1 } else { v }
}

/// Panel resolutions used as bounding boxes.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayPreset {
    /// LilyGo T5 4.7" (ED047TC1), 960×540, 16 gray levels
    #[default]
    #[value(name = "lilygo-t5-47")]
    LilygoT5_47,
    /// TRMNL 7.5" panel, 800×480
    #[value(name = "trmnl")]
    Trmnl,
}

impl DisplayPreset {
    /// Bounding box for this panel.
    pub fn bounds(self) -> Size {
        match self {
            DisplayPreset::LilygoT5_47 => Size { w: 960, h: 540 },
            DisplayPreset::Trmnl => Size { w: 800, h: 480 },
        }
    }
}
