// SPDX-License-Identifier: MIT
use fast_image_resize::Resizer;

use crate::bitmap::Bitmap;
use crate::cpu::resize;
use crate::error::PrepError;
use crate::pack::{pack_with, PackedBuffer, Quantization};
use crate::presets::Size;

/// Resize `src` into `bounds` and pack the result for the panel.
///
/// The resize step always yields even dimensions, so packing cannot fail with
/// [`PrepError::OddPixelCount`] on this path.
pub fn prepare(
    resizer: &mut Resizer,
    src: &Bitmap,
    bounds: Size,
    quantization: Quantization,
) -> Result<PackedBuffer, PrepError> {
    let resized = resize(resizer, src, bounds)?;
    pack_with(&resized, quantization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_full_hd() {
        let mut resizer = Resizer::new();
        let src = Bitmap::filled(Size::new(1920, 1080), 255).unwrap();

        let packed = prepare(&mut resizer, &src, Size::new(960, 540), Quantization::Linear).unwrap();

        assert_eq!(packed.size(), Size::new(960, 540));
        assert_eq!(packed.as_bytes().len(), 259_200);
    }

    #[test]
    fn test_prepare_odd_source_is_packable() {
        let mut resizer = Resizer::new();
        let src = Bitmap::filled(Size::new(3, 3), 128).unwrap();

        let packed = prepare(&mut resizer, &src, Size::new(960, 540), Quantization::Linear).unwrap();

        // square source is relatively taller: width = 540
        assert_eq!(packed.size(), Size::new(540, 540));
        assert_eq!(packed.as_bytes().len(), 540 * 540 / 2);
    }
}
