// SPDX-License-Identifier: MIT
// Grayscale resampling for panel preparation.
// One byte per pixel, no row padding, bilinear filter.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};

use crate::bitmap::Bitmap;
use crate::error::PrepError;
use crate::presets::{fit_even, Size};

/// Resample `src` to exactly `out`, stretching as needed.
/// Returns a copy of `src` when the sizes already match.
pub fn scale_gray_cpu(resizer: &mut Resizer, src: &Bitmap, out: Size) -> Result<Bitmap, PrepError> {
    if out.w == 0 || out.h == 0 {
        return Err(PrepError::InvalidDimension {
            what: "scale target",
            w: out.w,
            h: out.h,
        });
    }
    if src.size() == out {
        return Ok(src.clone());
    }

    let src_view = TypedImageRef::<U8>::from_buffer(src.width(), src.height(), src.as_slice())?;

    let mut dst = vec![0u8; out.pixels()];
    {
        let mut dst_image = TypedImage::<U8>::from_buffer(out.w, out.h, &mut dst)?;
        let opts = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
        resizer.resize_typed::<U8>(&src_view, &mut dst_image, &opts)?;
    }

    Bitmap::new(out, dst)
}

/// Fit `src` into `max` (see [`fit_even`]) and resample it to the planned size.
pub fn resize(resizer: &mut Resizer, src: &Bitmap, max: Size) -> Result<Bitmap, PrepError> {
    let out = fit_even(src.size(), max)?;
    scale_gray_cpu(resizer, src, out)
}
