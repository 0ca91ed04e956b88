use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::CodeStyle;
use crate::common::BarcodeFormat;
use crate::reader::{ContentType, Decoded, ScannedContent};
use crate::template::FieldValues;

// Record
//------------------------------------------------------------------------------

/// Common surface of the persisted entities.
pub trait Record: Clone {
    fn id(&self) -> Uuid;

    /// Grouping key used by `get_by_type`.
    fn kind(&self) -> &str;

    fn is_favorite(&self) -> bool;

    fn set_favorite(&mut self, favorite: bool);

    fn updated_at(&self) -> DateTime<Utc>;

    /// Case-insensitive substring match against the record's searchable text.
    /// `query` is expected in lowercase.
    fn matches(&self, query: &str) -> bool;
}

fn contains_ci(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

// Generated code
//------------------------------------------------------------------------------

/// A code the user composed from a template and chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCodeRecord {
    pub id: Uuid,
    pub template_id: String,
    pub template_name: String,
    pub format: BarcodeFormat,
    pub values: FieldValues,
    pub content: String,
    pub style: CodeStyle,
    pub favorite: bool,
    pub scan_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneratedCodeRecord {
    pub fn new(
        template_id: impl Into<String>,
        template_name: impl Into<String>,
        format: BarcodeFormat,
        values: FieldValues,
        content: impl Into<String>,
        style: CodeStyle,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            template_id: template_id.into(),
            template_name: template_name.into(),
            format,
            values,
            content: content.into(),
            style,
            favorite: false,
            scan_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn increment_scan_count(&mut self) {
        self.scan_count = self.scan_count.saturating_add(1);
        self.touch();
    }
}

impl Record for GeneratedCodeRecord {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> &str {
        &self.template_id
    }

    fn is_favorite(&self) -> bool {
        self.favorite
    }

    fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
        self.touch();
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn matches(&self, query: &str) -> bool {
        contains_ci(&self.template_name, query)
            || contains_ci(&self.content, query)
            || self.values.values().any(|v| contains_ci(v, query))
    }
}

// Scan
//------------------------------------------------------------------------------

/// One accepted decode in the scan history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: Uuid,
    pub raw_text: String,
    pub display_text: String,
    pub format: BarcodeFormat,
    pub content_type: ContentType,
    pub scanned_at: DateTime<Utc>,
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ScanRecord {
    pub fn new(raw_text: &str, format: BarcodeFormat) -> Self {
        let ScannedContent { raw_text, content_type, display_text, metadata } =
            ScannedContent::parse(raw_text, format);
        Self {
            id: Uuid::new_v4(),
            raw_text,
            display_text,
            format,
            content_type,
            scanned_at: Utc::now(),
            favorite: false,
            metadata,
        }
    }

    pub fn from_scan(decoded: &Decoded) -> Self {
        Self::new(&decoded.raw_text, decoded.format)
    }

    /// Same symbology and payload.
    pub fn is_duplicate_of(&self, other: &ScanRecord) -> bool {
        self.format == other.format && self.raw_text == other.raw_text
    }
}

impl Record for ScanRecord {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> &str {
        self.content_type.as_str()
    }

    fn is_favorite(&self) -> bool {
        self.favorite
    }

    fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.scanned_at
    }

    fn matches(&self, query: &str) -> bool {
        contains_ci(&self.raw_text, query) || contains_ci(&self.display_text, query)
    }
}

#[cfg(test)]
mod records_tests {
    use super::{GeneratedCodeRecord, Record, ScanRecord};
    use crate::builder::CodeStyle;
    use crate::common::BarcodeFormat;
    use crate::reader::{ContentType, Decoded};
    use crate::template::FieldValues;

    fn generated() -> GeneratedCodeRecord {
        let values = FieldValues::from([("url".to_string(), "example.com/Menu".to_string())]);
        GeneratedCodeRecord::new(
            "url",
            "Website",
            BarcodeFormat::QrCode,
            values,
            "https://example.com/Menu",
            CodeStyle::default(),
        )
    }

    #[test]
    fn test_generated_new() {
        let rec = generated();
        assert_eq!(rec.scan_count, 0);
        assert!(!rec.favorite);
        assert_eq!(rec.created_at, rec.updated_at);
        assert_eq!(rec.kind(), "url");
    }

    #[test]
    fn test_increment_scan_count() {
        let mut rec = generated();
        rec.increment_scan_count();
        rec.increment_scan_count();
        assert_eq!(rec.scan_count, 2);
        assert!(rec.updated_at >= rec.created_at);
    }

    #[test]
    fn test_generated_matches() {
        let rec = generated();
        assert!(rec.matches("menu"));
        assert!(rec.matches("website"));
        assert!(!rec.matches("wifi"));
    }

    #[test]
    fn test_scan_from_decoded() {
        let decoded = Decoded::new("WIFI:T:WPA;S:Cafe;P:latte123;H:false;;", BarcodeFormat::QrCode);
        let rec = ScanRecord::from_scan(&decoded);
        assert_eq!(rec.content_type, ContentType::Wifi);
        assert_eq!(rec.display_text, "Cafe");
        assert_eq!(rec.metadata.get("password").map(String::as_str), Some("latte123"));
        assert_eq!(rec.kind(), "WIFI");
    }

    #[test]
    fn test_scan_duplicate() {
        let a = ScanRecord::new("hello", BarcodeFormat::QrCode);
        let b = ScanRecord::new("hello", BarcodeFormat::QrCode);
        let c = ScanRecord::new("hello", BarcodeFormat::Aztec);
        assert!(a.is_duplicate_of(&b));
        assert!(!a.is_duplicate_of(&c));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_scan_serde() {
        let rec = ScanRecord::new("tel:+15551234567", BarcodeFormat::QrCode);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"content_type\":\"PHONE\""));
        assert!(json.contains("\"format\":\"QR_CODE\""));
        let back: ScanRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
