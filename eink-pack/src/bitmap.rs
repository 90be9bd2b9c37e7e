// SPDX-License-Identifier: MIT
use crate::error::PrepError;
use crate::presets::Size;

/// Row-major grid of 8-bit grayscale samples with non-zero dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap `data` as a `size.w` × `size.h` bitmap.
    pub fn new(size: Size, data: Vec<u8>) -> Result<Self, PrepError> {
        if size.w == 0 || size.h == 0 {
            return Err(PrepError::InvalidDimension {
                what: "bitmap",
                w: size.w,
                h: size.h,
            });
        }
        let expected = size.pixels();
        if data.len() != expected {
            return Err(PrepError::BufferLength {
                size,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// A bitmap with every sample set to `value`.
    pub fn filled(size: Size, value: u8) -> Result<Self, PrepError> {
        Self::new(size, vec![value; size.pixels()])
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.w
    }

    pub fn height(&self) -> u32 {
        self.size.h
    }

    /// Samples in row-major scan order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
