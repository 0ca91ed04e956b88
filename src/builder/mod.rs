mod render;
mod style;

pub use render::{BlankRenderer, Renderer};
pub use style::{CodeStyle, Color};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::capacity::{check_content, CapacityReport};
use crate::common::{BarcodeFormat, CodeError, CodeResult, ECLevel};
use crate::store::GeneratedCodeRecord;
use crate::template::{find_template, FieldValues, Template};

// Builder
//------------------------------------------------------------------------------

/// Collects form values for one template and turns them into a checked
/// payload, and optionally an image.
#[derive(Debug, Clone)]
pub struct CodeBuilder<'a> {
    template: &'a Template,
    values: FieldValues,
    format: BarcodeFormat,
    style: CodeStyle,
}

impl<'a> CodeBuilder<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self {
            template,
            values: template.default_values(),
            format: template.default_format,
            style: CodeStyle::default(),
        }
    }

    pub fn value(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Merges `values` over the current ones.
    pub fn values<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn format(&mut self, format: BarcodeFormat) -> &mut Self {
        self.format = format;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.style.ec_level = ec_level;
        self
    }

    pub fn style(&mut self, style: CodeStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    pub fn current_values(&self) -> &FieldValues {
        &self.values
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Template: {}, Format: {}, Ec level: {}, Size: {} }}",
            self.template.id, self.format, self.style.ec_level, self.style.size
        )
    }
}

impl CodeBuilder<'static> {
    pub fn from_id(id: &str) -> CodeResult<Self> {
        Ok(Self::new(find_template(id)?))
    }

    /// Reopens a saved code for editing.
    pub fn from_record(record: &GeneratedCodeRecord) -> CodeResult<Self> {
        let mut builder = Self::from_id(&record.template_id)?;
        builder.values = record.values.clone();
        builder.format = record.format;
        builder.style = record.style.clone();
        Ok(builder)
    }
}


// Orchestration
//------------------------------------------------------------------------------

impl CodeBuilder<'_> {
    pub fn validate(&self) -> CodeResult<()> {
        let errs = self.template.validate(&self.values);
        if errs.is_empty() {
            return Ok(());
        }
        debug!(template = self.template.id, fields = ?errs.keys().collect::<Vec<_>>(), "validation failed");
        Err(CodeError::Validation(errs))
    }

    /// Formatted payload without any checks, for previews.
    pub fn content(&self) -> CodeResult<String> {
        self.template.format(&self.values)
    }

    /// Live feedback for the current values. Formatting failures yield an
    /// empty payload report rather than an error.
    pub fn capacity_report(&self) -> CapacityReport {
        let content = self.content().unwrap_or_default();
        CapacityReport::new(&content, self.format, self.style.ec_level)
    }

    pub fn compose(&self) -> CodeResult<ComposedCode> {
        debug!("Composing code {}", self.metadata());
        self.validate()?;
        if !self.template.supports(self.format) {
            return Err(CodeError::UnsupportedFormat {
                template: self.template.id.to_string(),
                format: self.format,
            });
        }

        let content = self.content()?;
        if content.trim().is_empty() {
            return Err(CodeError::EmptyData);
        }

        if let Err(e) = check_content(&content, self.format, self.style.ec_level) {
            warn!(template = self.template.id, error = %e, "content rejected");
            return Err(e);
        }

        Ok(ComposedCode {
            template_id: self.template.id.to_string(),
            template_name: self.template.name.to_string(),
            format: self.format,
            values: self.values.clone(),
            content,
            style: self.style.clone(),
        })
    }

    pub fn render(&self, renderer: &impl Renderer) -> CodeResult<GeneratedCode> {
        let code = self.compose()?;
        code.style.validate()?;
        let Some(image) = renderer.render(&code.content, code.format, &code.style) else {
            warn!(format = %code.format, "renderer produced no image");
            return Err(CodeError::RenderFailed(code.format));
        };
        debug!(width = image.width(), height = image.height(), "code rendered");
        Ok(GeneratedCode { code, image })
    }
}

// Output
//------------------------------------------------------------------------------

/// Payload that passed validation, formatting and the capacity checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedCode {
    pub template_id: String,
    pub template_name: String,
    pub format: BarcodeFormat,
    pub values: FieldValues,
    pub content: String,
    pub style: CodeStyle,
}

impl ComposedCode {
    pub fn to_record(&self) -> GeneratedCodeRecord {
        GeneratedCodeRecord::new(
            self.template_id.clone(),
            self.template_name.clone(),
            self.format,
            self.values.clone(),
            self.content.clone(),
            self.style.clone(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedCode {
    pub code: ComposedCode,
    pub image: RgbaImage,
}

impl GeneratedCode {
    pub fn content(&self) -> &str {
        &self.code.content
    }

    pub fn to_record(&self) -> GeneratedCodeRecord {
        self.code.to_record()
    }
}
