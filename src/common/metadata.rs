use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CodeError;

// Error correction level
//------------------------------------------------------------------------------

/// QR error correction level. Only QR capacity depends on it.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ECLevel {
    L = 0,
    #[default]
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Approximate share of codewords that can be restored.
    pub fn recovery_percent(self) -> u8 {
        match self {
            Self::L => 7,
            Self::M => 15,
            Self::Q => 25,
            Self::H => 30,
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for ECLevel {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Self::L),
            "M" | "MEDIUM" => Ok(Self::M),
            "Q" | "QUARTILE" => Ok(Self::Q),
            "H" | "HIGH" => Ok(Self::H),
            _ => Err(CodeError::InvalidValue {
                key: "error_correction".to_string(),
                reason: format!("unknown error correction level {s:?}"),
            }),
        }
    }
}

// Mode
//------------------------------------------------------------------------------

/// Encoding mode of a payload, which selects the capacity column of 2D formats.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl PartialOrd for Mode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mode {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl Mode {
    /// Alphanumeric membership ignores case, so lowercase letters count.
    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => matches!(
                byte.to_ascii_uppercase(),
                b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':'
            ),
            Self::Byte => true,
        }
    }

    /// Narrowest mode able to hold every byte of `content`. Empty content is numeric.
    pub fn detect(content: &str) -> Self {
        content.bytes().fold(Self::Numeric, |mode, b| {
            MODES.iter().copied().filter(|m| *m >= mode).find(|m| m.contains(b)).unwrap_or(Self::Byte)
        })
    }
}

pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];

#[cfg(test)]
mod mode_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::Mode::{self, *};
    use super::{ECLevel, MODES};

    #[test]
    fn test_comparison() {
        assert!(Numeric == Numeric);
        assert!(Numeric < Alphanumeric);
        assert!(Numeric < Byte);
        assert!(Alphanumeric < Byte);
    }

    #[test]
    fn test_is_numeric() {
        assert!(Numeric.contains(b'0'));
        assert!(Numeric.contains(b'9'));
        assert!(!Numeric.contains(b'A'));
        assert!(!Numeric.contains(b' '));
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(Alphanumeric.contains(b'0'));
        assert!(Alphanumeric.contains(b'Z'));
        assert!(Alphanumeric.contains(b'z'));
        assert!(Alphanumeric.contains(b' '));
        assert!(Alphanumeric.contains(b':'));
        assert!(!Alphanumeric.contains(b'@'));
        assert!(!Alphanumeric.contains(b'('));
    }

    #[test_case("0123456789", Numeric; "digits")]
    #[test_case("", Numeric; "empty")]
    #[test_case("HELLO WORLD", Alphanumeric; "upper")]
    #[test_case("hello world", Alphanumeric; "lower")]
    #[test_case("HTTP://X.COM/$5", Alphanumeric; "url charset")]
    #[test_case("a@b.com", Byte; "email")]
    #[test_case("Grüße", Byte; "non ascii")]
    fn test_detect(content: &str, exp: Mode) {
        assert_eq!(Mode::detect(content), exp);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("h".parse::<ECLevel>().unwrap(), ECLevel::H);
        assert_eq!("Quartile".parse::<ECLevel>().unwrap(), ECLevel::Q);
        assert!("X".parse::<ECLevel>().is_err());
        assert_eq!(ECLevel::default(), ECLevel::M);
    }

    proptest! {
        #[test]
        fn proptest_detected_mode_holds_content(content in "\\PC{0,40}") {
            let mode = Mode::detect(&content);
            prop_assert!(content.bytes().all(|b| mode.contains(b)));
            let narrower = MODES.iter().filter(|m| **m < mode);
            for m in narrower {
                prop_assert!(!content.bytes().all(|b| m.contains(b)));
            }
        }
    }
}
