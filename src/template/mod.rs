pub mod catalog;
pub mod formatters;
pub mod validation;

pub use catalog::*;
pub use formatters::Fields;
pub use validation::*;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{BarcodeFormat, CodeError, CodeResult};

/// Raw form input keyed by field key.
pub type FieldValues = BTreeMap<String, String>;

/// Pure mapping from form input to the encoded payload.
pub type FormatFn = fn(&Fields) -> CodeResult<String>;

// Category
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Category {
    General,
    Communication,
    SocialWeb,
    LocationEvents,
    Business,
    Product,
    Documents,
    Tickets,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::General,
        Self::Communication,
        Self::SocialWeb,
        Self::LocationEvents,
        Self::Business,
        Self::Product,
        Self::Documents,
        Self::Tickets,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Communication => "Communication",
            Self::SocialWeb => "Social & Web",
            Self::LocationEvents => "Location & Events",
            Self::Business => "Business",
            Self::Product => "Product",
            Self::Documents => "Documents",
            Self::Tickets => "Tickets",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// Field definition
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FieldType {
    Text,
    Multiline,
    Email,
    Phone,
    Url,
    Number,
    Dropdown,
    Date,
    Time,
    DateTime,
    Checkbox,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: &'static str,
    pub helper_text: &'static str,
    pub validation: Option<ValidationRule>,
    pub default_value: &'static str,
    pub options: &'static [&'static str],
}

impl FieldDefinition {
    pub const fn new(key: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            key,
            label,
            field_type,
            required: false,
            placeholder: "",
            helper_text: "",
            validation: None,
            default_value: "",
            options: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub const fn helper(mut self, helper_text: &'static str) -> Self {
        self.helper_text = helper_text;
        self
    }

    pub const fn rule(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default_value = value;
        self
    }

    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

// Template
//------------------------------------------------------------------------------

/// Static description of a form and the payload it produces.
#[derive(Clone, Copy)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub default_format: BarcodeFormat,
    pub allowed_formats: &'static [BarcodeFormat],
    pub fields: &'static [FieldDefinition],
    pub(crate) formatter: FormatFn,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("default_format", &self.default_format)
            .field("allowed_formats", &self.allowed_formats)
            .field("fields", &self.fields.iter().map(|f| f.key).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Template {
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn supports(&self, format: BarcodeFormat) -> bool {
        self.allowed_formats.contains(&format)
    }

    /// Form values pre-filled with every non-empty field default.
    pub fn default_values(&self) -> FieldValues {
        self.fields
            .iter()
            .filter(|f| !f.default_value.is_empty())
            .map(|f| (f.key.to_string(), f.default_value.to_string()))
            .collect()
    }

    /// Composes the payload for `values`. Any formatter failure is reported as
    /// [`CodeError::Formatting`]; required-ness is not re-checked here.
    pub fn format(&self, values: &FieldValues) -> CodeResult<String> {
        (self.formatter)(&Fields::new(values)).map_err(|e| {
            debug!(template = self.id, error = %e, "formatter failed");
            CodeError::Formatting(e.to_string())
        })
    }

    /// Field-local errors keyed by field key. Empty when the form is valid.
    pub fn validate(&self, values: &FieldValues) -> BTreeMap<String, String> {
        let mut errs: BTreeMap<String, String> = self
            .fields
            .iter()
            .filter_map(|f| {
                let value = values.get(f.key).map(String::as_str).unwrap_or("");
                f.validate(value).map(|msg| (f.key.to_string(), msg))
            })
            .collect();
        for (key, msg) in cross_field_errors(self, values) {
            errs.entry(key).or_insert(msg);
        }
        errs
    }
}
