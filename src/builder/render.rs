use image::RgbaImage;

use super::style::CodeStyle;
use crate::common::BarcodeFormat;

/// Draws a symbol for already composed and checked content.
///
/// Implementations may still reject combinations the symbology cannot encode
/// by returning `None`.
pub trait Renderer {
    fn render(&self, content: &str, format: BarcodeFormat, style: &CodeStyle) -> Option<RgbaImage>;
}

impl<F> Renderer for F
where
    F: Fn(&str, BarcodeFormat, &CodeStyle) -> Option<RgbaImage>,
{
    fn render(&self, content: &str, format: BarcodeFormat, style: &CodeStyle) -> Option<RgbaImage> {
        self(content, format, style)
    }
}

/// Renderer producing a blank canvas in the style's background color. Useful
/// where only the composed payload matters, such as previews of the form.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlankRenderer;

impl Renderer for BlankRenderer {
    fn render(&self, content: &str, _: BarcodeFormat, style: &CodeStyle) -> Option<RgbaImage> {
        if content.is_empty() || style.size == 0 {
            return None;
        }
        Some(RgbaImage::from_pixel(style.size, style.size, style.background.to_rgba()))
    }
}
