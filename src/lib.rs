//! # qrcraft
//!
//! Template-driven content composition for QR codes and barcodes. Turns form
//! values into well-formed payloads (WiFi credentials, vCards, calendar events,
//! payment links, product numbers and more) and checks them against the
//! capacity and syntax rules of the chosen symbology before anything is drawn.
//!
//! ## Features
//!
//! - **Template Catalog**: 24 built-in templates across eight categories, each with typed fields and a deterministic formatter
//! - **Form Validation**: Per-field rules plus cross-field checks such as WiFi password length per security type
//! - **Capacity Checks**: Character limits per symbology, error correction level and encoding mode, with structural checks for retail and linear formats
//! - **Scan Parsing**: Content type detection and structured metadata for decoded payloads
//! - **Record Store**: In-memory history of generated and scanned codes with change notifications
//!
//! Drawing and recognizing symbols is left to the caller through the
//! [`Renderer`] and [`Decoder`](reader::Decoder) traits.
//!
//! ## Quick Start
//!
//! ### Composing a WiFi Code
//!
//! ```rust
//! use qrcraft::CodeBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = CodeBuilder::from_id("wifi")?
//!     .value("ssid", "HomeNetwork")
//!     .value("password", "password123")
//!     .compose()?;
//!
//! assert_eq!(code.content, "WIFI:T:WPA;S:HomeNetwork;P:password123;H:false;;");
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcraft::{BarcodeFormat, BlankRenderer, CodeBuilder, CodeStyle, Color, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let style = CodeStyle { size: 256, foreground: Color::from_hex("#1A237E")?, ..Default::default() };
//! let generated = CodeBuilder::from_id("url")?
//!     .value("url", "example.com")
//!     .format(BarcodeFormat::Aztec)  // must be one of the template's allowed formats
//!     .style(style)
//!     .ec_level(ECLevel::H)          // defaults to ECLevel::M
//!     .render(&BlankRenderer)?;
//!
//! assert_eq!(generated.content(), "https://example.com");
//! assert_eq!(generated.image.dimensions(), (256, 256));
//! # Ok(())
//! # }
//! ```
//!
//! ### Checking Capacity
//!
//! ```rust
//! use qrcraft::{capacity::check_content, BarcodeFormat, CodeError, ECLevel};
//!
//! let err = check_content("12345", BarcodeFormat::Ean13, ECLevel::M).unwrap_err();
//! assert!(matches!(err, CodeError::InvalidContent { .. }));
//! ```
//!
//! ### Parsing a Scan
//!
//! ```rust
//! use qrcraft::reader::{ContentType, ScannedContent};
//! use qrcraft::BarcodeFormat;
//!
//! let scan = ScannedContent::parse("geo:48.8584,2.2945", BarcodeFormat::QrCode);
//! assert_eq!(scan.content_type, ContentType::Geo);
//! assert_eq!(scan.metadata["latitude"], "48.8584");
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! Higher levels lower the capacity of QR codes. Aztec, Data Matrix and
//! PDF417 limits do not depend on the level.

pub mod builder;
pub mod capacity;
pub mod common;
pub mod reader;
pub mod store;
pub mod template;

pub use builder::{BlankRenderer, CodeBuilder, CodeStyle, Color, ComposedCode, GeneratedCode, Renderer};
pub use capacity::CapacityReport;
pub use common::{BarcodeFormat, CodeError, CodeResult, ECLevel, ErrorKind, Mode};
pub use template::{
    find_template, get_all_templates, get_template_by_id, get_templates_by_category, Category,
    FieldDefinition, FieldType, FieldValues, Template,
};
