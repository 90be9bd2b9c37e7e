// SPDX-License-Identifier: MIT
//! # eink-pack: Grayscale Preparation for E-Ink Panels
//!
//! This crate turns an 8-bit grayscale bitmap into the packed 4-bit buffer an
//! e-ink display controller draws directly.
//!
//! ## Pipeline
//!
//! 1. **Plan**: [`presets::fit_even`] fits the source into the panel's bounding box,
//!    preserving aspect ratio and forcing both output dimensions even.
//! 2. **Scale**: [`cpu::scale_gray_cpu`] resamples the bitmap with fast_image_resize.
//! 3. **Pack**: [`pack::pack`] quantizes each sample to 4 bits and stores two pixels
//!    per byte (even pixel in the low nibble, odd pixel in the high nibble).
//!
//! [`pipeline::prepare`] runs all three steps.
//!
//! ## Usage Example
//!
//! ```rust
//! use eink_pack::{Bitmap, Size};
//! use eink_pack::pack::Quantization;
//! use eink_pack::pipeline::prepare;
//! use eink_pack::presets::DisplayPreset;
//!
//! let source = Bitmap::filled(Size { w: 1920, h: 1080 }, 255)?;
//! let mut resizer = fast_image_resize::Resizer::new();
//!
//! let packed = prepare(
//!     &mut resizer,
//!     &source,
//!     DisplayPreset::LilygoT5_47.bounds(),
//!     Quantization::Linear,
//! )?;
//!
//! assert_eq!(packed.size(), Size { w: 960, h: 540 });
//! assert_eq!(packed.as_bytes().len(), 960 * 540 / 2);
//! # Ok::<(), eink_pack::PrepError>(())
//! ```

pub mod bitmap;
pub mod cpu;
pub mod error;
pub mod pack;
pub mod pipeline;
pub mod presets;

pub use bitmap::Bitmap;
pub use error::PrepError;
pub use pack::PackedBuffer;
pub use presets::Size;
