//! Per-template payload formatters.
//!
//! Every formatter is a pure function of its [`Fields`]: blank optional values
//! are left out of the output entirely, missing required values surface as
//! [`CodeError::MissingValue`]. Structured values (numbers, addresses, dates)
//! are read trimmed; free text and credentials are read as typed.

pub mod business;
pub mod communication;
pub mod documents;
pub mod general;
pub mod location;
pub mod product;
pub mod social;
pub mod tickets;

#[cfg(test)]
use std::{cell::RefCell, collections::BTreeSet};

use crate::common::{CodeError, CodeResult};

use super::FieldValues;

/// Read-only view over form values that treats blank input as absent.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    values: &'a FieldValues,
    #[cfg(test)]
    reads: Option<&'a RefCell<BTreeSet<String>>>,
}

impl<'a> Fields<'a> {
    pub fn new(values: &'a FieldValues) -> Self {
        Self {
            values,
            #[cfg(test)]
            reads: None,
        }
    }

    /// View that notes every key a formatter asks for.
    #[cfg(test)]
    pub(crate) fn recording(values: &'a FieldValues, reads: &'a RefCell<BTreeSet<String>>) -> Self {
        Self { values, reads: Some(reads) }
    }

    fn lookup(&self, key: &str) -> Option<&'a String> {
        #[cfg(test)]
        if let Some(reads) = self.reads {
            reads.borrow_mut().insert(key.to_string());
        }
        self.values.get(key)
    }

    /// Trimmed value of `key`, or `None` when missing or blank.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.lookup(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> CodeResult<&'a str> {
        self.get(key).ok_or_else(|| CodeError::MissingValue(key.to_string()))
    }

    /// Value of `key` exactly as typed, or `None` when missing or blank.
    pub fn raw(&self, key: &str) -> Option<&'a str> {
        self.lookup(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    pub fn require_raw(&self, key: &str) -> CodeResult<&'a str> {
        self.raw(key).ok_or_else(|| CodeError::MissingValue(key.to_string()))
    }

    pub fn get_or(&self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Checkbox state; anything but a literal `true` is unchecked.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Appends `prefix` + `value` as a line when `value` is present.
pub(crate) fn push_line(lines: &mut Vec<String>, prefix: &str, value: Option<&str>) {
    if let Some(v) = value {
        lines.push(format!("{prefix}{v}"));
    }
}

/// Joins `(name, value)` query parameters, skipping absent values. Returns an
/// empty string when nothing is present, otherwise a string starting with `?`.
pub(crate) fn query(params: &[(&str, Option<&str>)]) -> String {
    let parts: Vec<String> =
        params.iter().filter_map(|(k, v)| v.map(|v| format!("{k}={v}"))).collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}
