//! Capacity and structural checks for formatted content.
//!
//! Two-dimensional formats pick a capacity column from the encoding [`Mode`]
//! of the content; only QR additionally depends on the [`ECLevel`]. Linear
//! formats have a fixed practical character count.

use tracing::debug;

use crate::common::{BarcodeFormat, CodeError, CodeResult, ECLevel, Mode};

// Capacity tables
//------------------------------------------------------------------------------

// Largest symbol of each 2D format, characters per mode: [numeric, alphanumeric, byte]
static QR_CAPACITY: [[usize; 3]; 4] = [
    [7089, 4296, 2953], // L
    [5596, 3391, 2331], // M
    [3993, 2420, 1663], // Q
    [3057, 1852, 1273], // H
];
static AZTEC_CAPACITY: [usize; 3] = [3832, 3067, 1914];
static DATA_MATRIX_CAPACITY: [usize; 3] = [3116, 2335, 1556];
static PDF417_CAPACITY: [usize; 3] = [2710, 1850, 1108];

fn mode_column(mode: Mode) -> usize {
    match mode {
        Mode::Numeric => 0,
        Mode::Alphanumeric => 1,
        Mode::Byte => 2,
    }
}

fn linear_capacity(format: BarcodeFormat) -> Option<usize> {
    let cap = match format {
        BarcodeFormat::Ean8 => 7,
        BarcodeFormat::Ean13 => 12,
        BarcodeFormat::UpcA => 11,
        BarcodeFormat::UpcE => 6,
        BarcodeFormat::Code39 => 43,
        BarcodeFormat::Code93 => 47,
        BarcodeFormat::Code128 => 80,
        BarcodeFormat::Itf => 80,
        BarcodeFormat::Codabar => 40,
        _ => return None,
    };
    Some(cap)
}

/// Length of content as counted against capacity.
pub fn content_len(content: &str) -> usize {
    content.chars().count()
}

/// Maximum number of characters `content` may have in `format`. `Unknown` is
/// treated as QR.
pub fn max_capacity(format: BarcodeFormat, ecl: ECLevel, content: &str) -> usize {
    if let Some(cap) = linear_capacity(format) {
        return cap;
    }
    let col = mode_column(Mode::detect(content));
    match format {
        BarcodeFormat::Aztec => AZTEC_CAPACITY[col],
        BarcodeFormat::DataMatrix => DATA_MATRIX_CAPACITY[col],
        BarcodeFormat::Pdf417 => PDF417_CAPACITY[col],
        _ => QR_CAPACITY[ecl as usize][col],
    }
}

pub fn is_within_capacity(content: &str, format: BarcodeFormat, ecl: ECLevel) -> bool {
    content_len(content) <= max_capacity(format, ecl, content)
}

/// Share of capacity used, in [0, 100].
pub fn capacity_percentage(content: &str, format: BarcodeFormat, ecl: ECLevel) -> f32 {
    let cap = max_capacity(format, ecl, content);
    if cap == 0 {
        return 100.0;
    }
    (content_len(content) as f32 / cap as f32 * 100.0).clamp(0.0, 100.0)
}

// Structural checks
//------------------------------------------------------------------------------

fn all_digits(content: &str) -> bool {
    content.bytes().all(|b| b.is_ascii_digit())
}

fn is_code39_char(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), '0'..='9' | 'A'..='Z' | '-' | '.' | ' ' | '*' | '$' | '/' | '+' | '%')
}

/// Symbology syntax check independent of length limits. Returns a user-facing
/// message when `content` cannot be encoded in `format`.
pub fn validate_format_specific_content(content: &str, format: BarcodeFormat) -> Option<String> {
    let len = content_len(content);
    let msg = match format {
        BarcodeFormat::Ean8 if !all_digits(content) || !(7..=8).contains(&len) => {
            "EAN-8 requires 7 or 8 digits"
        }
        BarcodeFormat::Ean13 if !all_digits(content) || !(12..=13).contains(&len) => {
            "EAN-13 requires 12 or 13 digits"
        }
        BarcodeFormat::UpcA if !all_digits(content) || !(11..=12).contains(&len) => {
            "UPC-A requires 11 or 12 digits"
        }
        BarcodeFormat::UpcE if !all_digits(content) || !(6..=8).contains(&len) => {
            "UPC-E requires 6 to 8 digits"
        }
        BarcodeFormat::Itf if !all_digits(content) || len % 2 != 0 => {
            "ITF requires an even number of digits"
        }
        BarcodeFormat::Code39 if !content.chars().all(is_code39_char) => {
            "Code 39 only supports 0-9, A-Z, space and - . $ / + % *"
        }
        _ => return None,
    };
    Some(msg.to_string())
}

// Composite check
//------------------------------------------------------------------------------

/// Accepts `content` for rendering only if it fits and is structurally valid.
/// The structural check runs first, since a malformed product number is more
/// useful to report than its length.
pub fn check_content(content: &str, format: BarcodeFormat, ecl: ECLevel) -> CodeResult<()> {
    if let Some(reason) = validate_format_specific_content(content, format) {
        debug!(%format, %reason, "content rejected by format rules");
        return Err(CodeError::InvalidContent { format, reason });
    }
    let length = content_len(content);
    let capacity = max_capacity(format, ecl, content);
    if length > capacity {
        debug!(%format, length, capacity, "content exceeds capacity");
        return Err(CodeError::CapacityExceeded { format, length, capacity });
    }
    Ok(())
}

/// Snapshot of how `content` fits a format, suitable for live feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReport {
    pub mode: Mode,
    pub length: usize,
    pub capacity: usize,
    pub percentage: f32,
    pub warning: Option<String>,
}

impl CapacityReport {
    pub fn new(content: &str, format: BarcodeFormat, ecl: ECLevel) -> Self {
        let warning = check_content(content, format, ecl).err().map(|e| match e {
            CodeError::InvalidContent { reason, .. } => reason,
            e => e.to_string(),
        });
        Self {
            mode: Mode::detect(content),
            length: content_len(content),
            capacity: max_capacity(format, ecl, content),
            percentage: capacity_percentage(content, format, ecl),
            warning,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.warning.is_none()
    }
}

#[cfg(test)]
mod capacity_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;
    use crate::common::BarcodeFormat::*;

    #[test_case(QrCode, ECLevel::L, "12345", 7089; "qr numeric L")]
    #[test_case(QrCode, ECLevel::H, "12345", 3057; "qr numeric H")]
    #[test_case(QrCode, ECLevel::M, "HELLO", 3391; "qr alphanumeric M")]
    #[test_case(QrCode, ECLevel::Q, "hello!", 1663; "qr byte Q")]
    #[test_case(Unknown, ECLevel::M, "hello!", 2331; "unknown uses qr")]
    #[test_case(Aztec, ECLevel::H, "12345", 3832; "aztec ignores ec")]
    #[test_case(DataMatrix, ECLevel::L, "ABC", 2335; "data matrix alphanumeric")]
    #[test_case(Pdf417, ECLevel::L, "a@b", 1108; "pdf417 byte")]
    #[test_case(Ean8, ECLevel::H, "hello!", 7; "ean8")]
    #[test_case(Ean13, ECLevel::L, "", 12; "ean13")]
    #[test_case(UpcA, ECLevel::L, "1", 11; "upca")]
    #[test_case(UpcE, ECLevel::L, "1", 6; "upce")]
    #[test_case(Code39, ECLevel::L, "1", 43; "code39")]
    #[test_case(Code93, ECLevel::L, "1", 47; "code93")]
    #[test_case(Code128, ECLevel::L, "1", 80; "code128")]
    #[test_case(Itf, ECLevel::L, "1", 80; "itf")]
    #[test_case(Codabar, ECLevel::L, "1", 40; "codabar")]
    fn test_max_capacity(format: BarcodeFormat, ecl: ECLevel, content: &str, exp: usize) {
        assert_eq!(max_capacity(format, ecl, content), exp);
    }

    #[test]
    fn test_is_within_capacity() {
        assert!(is_within_capacity("1234567", Ean8, ECLevel::M));
        assert!(!is_within_capacity("123456789", Ean8, ECLevel::M));
        let long = "!".repeat(1274);
        assert!(is_within_capacity(&long, QrCode, ECLevel::L));
        assert!(!is_within_capacity(&long, QrCode, ECLevel::H));
    }

    #[test]
    fn test_capacity_percentage() {
        assert_eq!(capacity_percentage("", Ean13, ECLevel::M), 0.0);
        assert_eq!(capacity_percentage("123456", Ean13, ECLevel::M), 50.0);
        assert_eq!(capacity_percentage("12345678901234567890", Ean13, ECLevel::M), 100.0);
    }

    #[test_case("12345678901", Ean13, true; "ean13 eleven digits")]
    #[test_case("123456789012", Ean13, false; "ean13 twelve digits")]
    #[test_case("1234567890123", Ean13, false; "ean13 thirteen digits")]
    #[test_case("12345678901a", Ean13, true; "ean13 letter")]
    #[test_case("1234567", Ean8, false; "ean8 seven")]
    #[test_case("123456", Ean8, true; "ean8 six")]
    #[test_case("12345678901", UpcA, false; "upca eleven")]
    #[test_case("1234567890", UpcA, true; "upca ten")]
    #[test_case("123456", UpcE, false; "upce six")]
    #[test_case("123456789", UpcE, true; "upce nine")]
    #[test_case("1234", Itf, false; "itf even")]
    #[test_case("123", Itf, true; "itf odd")]
    #[test_case("CODE-39 $/+%.*", Code39, false; "code39 charset")]
    #[test_case("code39", Code39, false; "code39 lowercase")]
    #[test_case("CODE_39", Code39, true; "code39 underscore")]
    #[test_case("anything goes", Code128, false; "code128 unchecked")]
    #[test_case("anything goes", QrCode, false; "qr unchecked")]
    fn test_format_specific(content: &str, format: BarcodeFormat, rejected: bool) {
        assert_eq!(validate_format_specific_content(content, format).is_some(), rejected);
    }

    #[test]
    fn test_check_content() {
        assert!(check_content("123456789012", Ean13, ECLevel::M).is_ok());
        assert!(matches!(
            check_content("12345678901", Ean13, ECLevel::M),
            Err(CodeError::InvalidContent { format: Ean13, .. })
        ));
        assert_eq!(
            check_content(&"A".repeat(44), Code39, ECLevel::M),
            Err(CodeError::CapacityExceeded { format: Code39, length: 44, capacity: 43 })
        );
    }

    #[test]
    fn test_capacity_report() {
        let report = CapacityReport::new("12345678901", Ean13, ECLevel::M);
        assert!(!report.is_ok());
        assert_eq!(report.warning.as_deref(), Some("EAN-13 requires 12 or 13 digits"));
        assert_eq!(report.length, 11);
        assert_eq!(report.capacity, 12);

        let report = CapacityReport::new("https://example.com", QrCode, ECLevel::M);
        assert!(report.is_ok());
        assert_eq!(report.mode, Mode::Alphanumeric);
        assert_eq!(report.capacity, 3391);
        assert_eq!(CapacityReport::new("a@b.com", QrCode, ECLevel::M).mode, Mode::Byte);
    }

    pub fn format_strategy() -> impl Strategy<Value = BarcodeFormat> {
        prop::sample::select(BarcodeFormat::ALL.to_vec())
    }

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    proptest! {
        #[test]
        fn proptest_percentage_monotonic(
            format in format_strategy(),
            ecl in ec_level_strategy(),
            len in 0usize..4000,
            extra in 1usize..200,
        ) {
            let short = "7".repeat(len);
            let long = "7".repeat(len + extra);
            let p1 = capacity_percentage(&short, format, ecl);
            let p2 = capacity_percentage(&long, format, ecl);
            prop_assert!(p1 <= p2);
            prop_assert!((0.0..=100.0).contains(&p1));
            prop_assert!((0.0..=100.0).contains(&p2));
        }

        #[test]
        fn proptest_within_capacity_matches_percentage(
            format in format_strategy(),
            ecl in ec_level_strategy(),
            content in "[a-z0-9]{0,120}",
        ) {
            if !is_within_capacity(&content, format, ecl) {
                prop_assert_eq!(capacity_percentage(&content, format, ecl), 100.0);
            }
        }
    }
}
