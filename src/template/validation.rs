use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::formatters::location::event_stamps;
use super::formatters::Fields;
use super::{FieldDefinition, FieldType, FieldValues, Template};
use crate::common::CodeError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-.]{7,20}$").expect("valid phone regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(https?://)?[a-z0-9\-]+(\.[a-z0-9\-]+)+(:\d{1,5})?([/?#]\S*)?$")
        .expect("valid url regex")
});
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]+$").expect("valid hex regex"));

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value) && value.bytes().filter(u8::is_ascii_digit).count() >= 7
}

pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

// Validation rule
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ValidationRule {
    Required,
    Email,
    Phone,
    Url,
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: &'static str, message: &'static str },
}

impl ValidationRule {
    /// Error message for `value`, if it breaks the rule. Only `Required` rejects
    /// blank input.
    pub fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return match self {
                Self::Required => Some("This field is required".to_string()),
                _ => None,
            };
        }
        let len = value.chars().count();
        match *self {
            Self::Required => None,
            Self::Email if !is_valid_email(value) => {
                Some("Please enter a valid email address".to_string())
            }
            Self::Phone if !is_valid_phone(value) => {
                Some("Please enter a valid phone number".to_string())
            }
            Self::Url if !is_valid_url(value) => Some("Please enter a valid URL".to_string()),
            Self::MinLength(n) if len < n => Some(format!("Must be at least {n} characters")),
            Self::MaxLength(n) if len > n => Some(format!("Must be at most {n} characters")),
            Self::Pattern { regex, message } => match Regex::new(regex) {
                Ok(re) if re.is_match(value) => None,
                _ => Some(message.to_string()),
            },
            _ => None,
        }
    }
}

// Field validation
//------------------------------------------------------------------------------

fn key_has(key: &str, parts: &[&str]) -> bool {
    parts.iter().any(|p| key.contains(p))
}

fn check_coordinate(value: &str, name: &str, bound: f64) -> Option<String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && (-bound..=bound).contains(&v) => None,
        _ => Some(format!("{name} must be a number between -{bound} and {bound}")),
    }
}

impl FieldDefinition {
    /// First problem with `value` for this field: required-ness, the declared
    /// rule, then checks implied by the field type and key.
    pub fn validate(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return self.required.then(|| "This field is required".to_string());
        }
        if let Some(msg) = self.validation.and_then(|r| r.check(value)) {
            return Some(msg);
        }
        self.check_type(value).or_else(|| self.check_key(value))
    }

    fn check_type(&self, value: &str) -> Option<String> {
        let ok = match self.field_type {
            FieldType::Email => is_valid_email(value),
            FieldType::Phone => is_valid_phone(value),
            FieldType::Url => is_valid_url(value),
            FieldType::Number => value.parse::<f64>().is_ok_and(f64::is_finite),
            FieldType::Date => NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok(),
            FieldType::Time => NaiveTime::parse_from_str(value, TIME_FORMAT).is_ok(),
            FieldType::DateTime => NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).is_ok(),
            FieldType::Dropdown => self.options.contains(&value),
            FieldType::Checkbox => matches!(value, "true" | "false"),
            FieldType::Text | FieldType::Multiline => true,
        };
        if ok {
            return None;
        }
        let msg = match self.field_type {
            FieldType::Email => "Please enter a valid email address",
            FieldType::Phone => "Please enter a valid phone number",
            FieldType::Url => "Please enter a valid URL",
            FieldType::Number => "Please enter a valid number",
            FieldType::Date => "Please enter a date as YYYY-MM-DD",
            FieldType::Time => "Please enter a time as HH:MM",
            FieldType::DateTime => "Please enter a date and time as YYYY-MM-DDTHH:MM",
            FieldType::Dropdown => "Please choose one of the options",
            _ => "Please choose yes or no",
        };
        Some(msg.to_string())
    }

    // Text fields named like structured values get the structured check too
    fn check_key(&self, value: &str) -> Option<String> {
        let key = self.key;
        if key_has(key, &["email"]) && !is_valid_email(value) {
            return Some("Please enter a valid email address".to_string());
        }
        if key_has(key, &["phone"]) && !is_valid_phone(value) {
            return Some("Please enter a valid phone number".to_string());
        }
        if key_has(key, &["url", "website"]) && !is_valid_url(value) {
            return Some("Please enter a valid URL".to_string());
        }
        match key {
            "ssid" if value.chars().count() > 32 => {
                Some("Network name must be at most 32 characters".to_string())
            }
            "latitude" => check_coordinate(value, "Latitude", 90.0),
            "longitude" => check_coordinate(value, "Longitude", 180.0),
            _ => None,
        }
    }
}

// Cross-field validation
//------------------------------------------------------------------------------

fn wifi_password_error(encryption: &str, password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    match encryption {
        "None" => None,
        _ if password.trim().is_empty() => Some("A password is required for secured networks"),
        "WEP" => {
            let ascii = password.is_ascii() && matches!(len, 5 | 13);
            let hex = HEX_RE.is_match(password) && matches!(len, 10 | 26);
            (!ascii && !hex).then_some("WEP keys are 5 or 13 characters, or 10 or 26 hex digits")
        }
        _ => (!(8..=63).contains(&len)).then_some("WPA passwords must be 8 to 63 characters"),
    }
}

/// Errors that depend on more than one field of `template`.
pub(crate) fn cross_field_errors(template: &Template, values: &FieldValues) -> Vec<(String, String)> {
    let get = |k: &str| values.get(k).map(String::as_str).unwrap_or("");
    let mut errs = vec![];
    if template.field("ssid").is_some() && template.field("encryption").is_some() {
        if let Some(msg) = wifi_password_error(get("encryption").trim(), get("password")) {
            errs.push(("password".to_string(), msg.to_string()));
        }
    }
    if template.field("start_date").is_some() && template.field("end_date").is_some() {
        if let Err(CodeError::InvalidValue { key, reason }) = event_stamps(&Fields::new(values)) {
            errs.push((key, reason));
        }
    }
    errs
}
