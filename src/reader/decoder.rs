use image::DynamicImage;
use tracing::trace;

use super::content::ContentType;
use crate::common::BarcodeFormat;

/// Result of recognizing a single symbol in an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub raw_text: String,
    pub format: BarcodeFormat,
    pub content_type: ContentType,
}

impl Decoded {
    /// Classifies `raw_text` from its text and symbology.
    pub fn new(raw_text: impl Into<String>, format: BarcodeFormat) -> Self {
        let raw_text = raw_text.into();
        let content_type = ContentType::detect(&raw_text, format);
        Self { raw_text, format, content_type }
    }
}

/// Symbol recognizer.
pub trait Decoder {
    fn decode(&self, img: &DynamicImage) -> Option<Decoded>;
}

impl<F> Decoder for F
where
    F: Fn(&DynamicImage) -> Option<Decoded>,
{
    fn decode(&self, img: &DynamicImage) -> Option<Decoded> {
        self(img)
    }
}

/// Tries `primary` first and falls back to `secondary` when it finds nothing.
#[derive(Debug, Clone)]
pub struct FallbackDecoder<P, S> {
    primary: P,
    secondary: S,
}

impl<P: Decoder, S: Decoder> FallbackDecoder<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: Decoder, S: Decoder> Decoder for FallbackDecoder<P, S> {
    fn decode(&self, img: &DynamicImage) -> Option<Decoded> {
        self.primary.decode(img).or_else(|| {
            trace!("primary decoder found nothing, trying fallback");
            self.secondary.decode(img)
        })
    }
}
