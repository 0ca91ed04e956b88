use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use super::format::BarcodeFormat;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    // Form input
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),
    #[error("missing value for field `{0}`")]
    MissingValue(String),
    #[error("invalid value for field `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    // Composition
    #[error("error formatting content: {0}")]
    Formatting(String),
    #[error("empty content")]
    EmptyData,
    #[error("content too long for {format}: {length} characters, capacity {capacity}")]
    CapacityExceeded { format: BarcodeFormat, length: usize, capacity: usize },
    #[error("invalid content for {format}: {reason}")]
    InvalidContent { format: BarcodeFormat, reason: String },
    #[error("{format} is not supported by template `{template}`")]
    UnsupportedFormat { template: String, format: BarcodeFormat },

    // Lookup
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("record not found: {0}")]
    RecordNotFound(Uuid),

    // Rendering
    #[error("failed to render {0}")]
    RenderFailed(BarcodeFormat),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("unknown barcode format: {0}")]
    UnknownFormat(String),

    // Persistence
    #[error("storage error: {0}")]
    Storage(String),
}

pub type CodeResult<T> = Result<T, CodeError>;

// Error kind
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    Validation,
    Capacity,
    Formatting,
    NotFound,
    Render,
    Input,
    Persistence,
}

impl ErrorKind {
    /// Not-found errors end the flow that raised them; everything else leaves the
    /// caller's state intact so the user can correct and retry.
    pub fn is_recoverable(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl CodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::MissingValue(_) | Self::InvalidValue { .. } => {
                ErrorKind::Validation
            }
            Self::CapacityExceeded { .. } | Self::InvalidContent { .. } => ErrorKind::Capacity,
            Self::Formatting(_) | Self::EmptyData => ErrorKind::Formatting,
            Self::TemplateNotFound(_) | Self::RecordNotFound(_) => ErrorKind::NotFound,
            Self::RenderFailed(_) => ErrorKind::Render,
            Self::UnsupportedFormat { .. } | Self::InvalidColor(_) | Self::UnknownFormat(_) => {
                ErrorKind::Input
            }
            Self::Storage(_) => ErrorKind::Persistence,
        }
    }

    /// Field-local messages, empty for form-global errors.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            Self::Validation(errs) => errs.clone(),
            Self::MissingValue(key) => {
                BTreeMap::from([(key.clone(), "This field is required".to_string())])
            }
            Self::InvalidValue { key, reason } => BTreeMap::from([(key.clone(), reason.clone())]),
            _ => BTreeMap::new(),
        }
    }
}
