//! The scanning side: classifying and parsing decoded payloads.

pub mod content;
pub mod decoder;

pub use content::{ContentType, ScannedContent};
pub use decoder::{Decoded, Decoder, FallbackDecoder};
