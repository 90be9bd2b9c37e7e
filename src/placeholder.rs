//! Placeholder image: a white panel-sized canvas with one line of black text.
//!
//! Text is drawn with embedded-graphics' built-in monospace font, so no font files
//! are needed at runtime.

use std::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::{Gray8, GrayColor};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use image::{GrayImage, Luma};

use eink_pack::Size;

use crate::config::PlaceholderConfig;

const BACKGROUND: u8 = 255;

/// `GrayImage` adapter for embedded-graphics. Pixels outside the image are clipped.
struct Canvas(GrayImage);

impl OriginDimensions for Canvas {
    fn size(&self) -> embedded_graphics::geometry::Size {
        embedded_graphics::geometry::Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = self.0.dimensions();
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < w && y < h {
                self.0.put_pixel(x, y, Luma([color.luma()]));
            }
        }
        Ok(())
    }
}

/// Render the placeholder at `size` with the configured text and baseline origin.
pub fn render(size: Size, config: &PlaceholderConfig) -> GrayImage {
    let mut canvas = Canvas(GrayImage::from_pixel(size.w, size.h, Luma([BACKGROUND])));

    let style = MonoTextStyle::new(&FONT_10X20, Gray8::BLACK);
    let text = Text::with_baseline(
        &config.text,
        Point::new(config.x, config.y),
        style,
        Baseline::Alphabetic,
    );
    let Ok(_) = text.draw(&mut canvas);

    canvas.0
}
