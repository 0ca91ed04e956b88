use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CodeError;

// Barcode format
//------------------------------------------------------------------------------

/// Symbology of a code. Two-dimensional formats carry arbitrary text, linear
/// formats carry short, mostly numeric payloads.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[default]
    #[serde(rename = "QR_CODE")]
    QrCode,
    #[serde(rename = "AZTEC")]
    Aztec,
    #[serde(rename = "DATA_MATRIX")]
    DataMatrix,
    #[serde(rename = "PDF_417")]
    Pdf417,
    #[serde(rename = "EAN_8")]
    Ean8,
    #[serde(rename = "EAN_13")]
    Ean13,
    #[serde(rename = "UPC_A")]
    UpcA,
    #[serde(rename = "UPC_E")]
    UpcE,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "CODE_93")]
    Code93,
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "ITF")]
    Itf,
    #[serde(rename = "CODABAR")]
    Codabar,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl BarcodeFormat {
    pub const ALL: [BarcodeFormat; 14] = [
        Self::QrCode,
        Self::Aztec,
        Self::DataMatrix,
        Self::Pdf417,
        Self::Ean8,
        Self::Ean13,
        Self::UpcA,
        Self::UpcE,
        Self::Code39,
        Self::Code93,
        Self::Code128,
        Self::Itf,
        Self::Codabar,
        Self::Unknown,
    ];

    pub fn is_2d(self) -> bool {
        matches!(self, Self::QrCode | Self::Aztec | Self::DataMatrix | Self::Pdf417)
    }

    pub fn is_1d(self) -> bool {
        !self.is_2d() && self != Self::Unknown
    }

    /// Retail symbologies whose payload is a product number.
    pub fn is_product(self) -> bool {
        matches!(self, Self::Ean8 | Self::Ean13 | Self::UpcA | Self::UpcE)
    }

    pub fn code_name(self) -> &'static str {
        match self {
            Self::QrCode => "QR_CODE",
            Self::Aztec => "AZTEC",
            Self::DataMatrix => "DATA_MATRIX",
            Self::Pdf417 => "PDF_417",
            Self::Ean8 => "EAN_8",
            Self::Ean13 => "EAN_13",
            Self::UpcA => "UPC_A",
            Self::UpcE => "UPC_E",
            Self::Code39 => "CODE_39",
            Self::Code93 => "CODE_93",
            Self::Code128 => "CODE_128",
            Self::Itf => "ITF",
            Self::Codabar => "CODABAR",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::QrCode => "QR Code",
            Self::Aztec => "Aztec",
            Self::DataMatrix => "Data Matrix",
            Self::Pdf417 => "PDF417",
            Self::Ean8 => "EAN-8",
            Self::Ean13 => "EAN-13",
            Self::UpcA => "UPC-A",
            Self::UpcE => "UPC-E",
            Self::Code39 => "Code 39",
            Self::Code93 => "Code 93",
            Self::Code128 => "Code 128",
            Self::Itf => "ITF",
            Self::Codabar => "Codabar",
            Self::Unknown => "Unknown",
        }
    }
}

impl Display for BarcodeFormat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BarcodeFormat {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| {
                f.code_name().eq_ignore_ascii_case(name) || f.display_name().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| CodeError::UnknownFormat(s.to_string()))
    }
}
