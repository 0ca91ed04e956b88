use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::common::BarcodeFormat;
use crate::template::is_valid_email;

// Content type
//------------------------------------------------------------------------------

/// What a decoded payload represents, judged from its text and symbology.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Text,
    Url,
    Email,
    Phone,
    Sms,
    Wifi,
    Contact,
    Event,
    Geo,
    Product,
    Crypto,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Url => "URL",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Sms => "SMS",
            Self::Wifi => "WIFI",
            Self::Contact => "CONTACT",
            Self::Event => "EVENT",
            Self::Geo => "GEO",
            Self::Product => "PRODUCT",
            Self::Crypto => "CRYPTO",
        }
    }

    pub fn detect(raw: &str, format: BarcodeFormat) -> Self {
        if format.is_product() {
            return Self::Product;
        }
        let text = raw.trim();
        let lower = text.to_ascii_lowercase();
        let starts = |prefixes: &[&str]| prefixes.iter().any(|p| lower.starts_with(p));
        if starts(&["wifi:"]) {
            Self::Wifi
        } else if starts(&["begin:vcard", "mecard:"]) {
            Self::Contact
        } else if starts(&["begin:vevent", "begin:vcalendar"]) {
            Self::Event
        } else if starts(&["mailto:", "matmsg:"]) || is_valid_email(text) {
            Self::Email
        } else if starts(&["tel:"]) {
            Self::Phone
        } else if starts(&["smsto:", "sms:"]) {
            Self::Sms
        } else if starts(&["geo:"]) {
            Self::Geo
        } else if starts(&["bitcoin:", "ethereum:"]) {
            Self::Crypto
        } else if starts(&["http://", "https://", "www."]) {
            Self::Url
        } else {
            Self::Text
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Parsing helpers
//------------------------------------------------------------------------------

/// Splits on `sep`, honouring backslash escapes and removing them.
fn split_escaped(s: &str, sep: char) -> Vec<String> {
    let mut parts = vec![];
    let mut cur = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    cur.push(next);
                }
            }
            c if c == sep => parts.push(std::mem::take(&mut cur)),
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        parts.push(cur);
    }
    parts
}

/// Case-insensitive prefix strip.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn decode_component(s: &str) -> String {
    urlencoding::decode(s).map(|c| c.into_owned()).unwrap_or_else(|_| s.to_string())
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .map(|(k, v)| (k.to_ascii_lowercase(), decode_component(v)))
        .collect()
}

/// `KEY:value` pairs of a semicolon separated record such as WiFi or MeCard.
fn tagged_fields(body: &str) -> Vec<(String, String)> {
    split_escaped(body, ';')
        .into_iter()
        .filter_map(|f| {
            let (k, v) = f.split_once(':')?;
            Some((k.to_ascii_uppercase(), v.to_string()))
        })
        .collect()
}

fn line_value<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    text.lines().find_map(|l| {
        let (k, v) = l.trim().split_once(':')?;
        let name = k.split(';').next()?;
        name.eq_ignore_ascii_case(tag).then_some(v)
    })
}

// Scanned content
//------------------------------------------------------------------------------

/// A decoded payload with its classification, a short label for lists and the
/// structured values found inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedContent {
    pub raw_text: String,
    pub content_type: ContentType,
    pub display_text: String,
    pub metadata: BTreeMap<String, String>,
}

impl ScannedContent {
    pub fn parse(raw: &str, format: BarcodeFormat) -> Self {
        let content_type = ContentType::detect(raw, format);
        let text = raw.trim();
        let mut meta = BTreeMap::new();
        let display = match content_type {
            ContentType::Wifi => parse_wifi(text, &mut meta),
            ContentType::Contact => parse_contact(text, &mut meta),
            ContentType::Event => {
                let summary = line_value(text, "SUMMARY").map(str::to_string);
                if let Some(start) = line_value(text, "DTSTART") {
                    meta.insert("start".to_string(), start.to_string());
                }
                if let Some(s) = &summary {
                    meta.insert("summary".to_string(), s.clone());
                }
                summary
            }
            ContentType::Email => parse_email(text, &mut meta),
            ContentType::Phone => {
                let number = strip_prefix_ci(text, "tel:").unwrap_or(text).to_string();
                meta.insert("number".to_string(), number.clone());
                Some(number)
            }
            ContentType::Sms => parse_sms(text, &mut meta),
            ContentType::Geo => parse_geo(text, &mut meta),
            ContentType::Crypto => parse_crypto(text, &mut meta),
            ContentType::Url | ContentType::Product | ContentType::Text => None,
        };
        Self {
            raw_text: raw.to_string(),
            content_type,
            display_text: display.filter(|d| !d.is_empty()).unwrap_or_else(|| text.to_string()),
            metadata: meta,
        }
    }
}

fn parse_wifi(text: &str, meta: &mut BTreeMap<String, String>) -> Option<String> {
    let body = strip_prefix_ci(text, "WIFI:")?;
    for (k, v) in tagged_fields(body) {
        let key = match k.as_str() {
            "S" => "ssid",
            "P" => "password",
            "T" => "encryption",
            "H" => "hidden",
            _ => continue,
        };
        meta.insert(key.to_string(), v);
    }
    meta.get("ssid").cloned()
}

fn parse_contact(text: &str, meta: &mut BTreeMap<String, String>) -> Option<String> {
    if let Some(body) = strip_prefix_ci(text, "MECARD:") {
        for (k, v) in tagged_fields(body) {
            let key = match k.as_str() {
                "N" => "name",
                "TEL" => "phone",
                "EMAIL" => "email",
                "URL" => "url",
                "ADR" => "address",
                _ => continue,
            };
            meta.entry(key.to_string()).or_insert(v);
        }
    } else {
        let name = line_value(text, "FN").or_else(|| line_value(text, "N"));
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            meta.insert("name".to_string(), name.to_string());
        }
        for (key, tag) in [("phone", "TEL"), ("email", "EMAIL"), ("organization", "ORG"), ("url", "URL")] {
            if let Some(v) = line_value(text, tag).filter(|v| !v.is_empty()) {
                meta.insert(key.to_string(), v.to_string());
            }
        }
    }
    meta.get("name").cloned()
}

fn parse_email(text: &str, meta: &mut BTreeMap<String, String>) -> Option<String> {
    if let Some(body) = strip_prefix_ci(text, "MATMSG:") {
        for (k, v) in tagged_fields(body) {
            let key = match k.as_str() {
                "TO" => "email",
                "SUB" => "subject",
                "BODY" => "body",
                _ => continue,
            };
            meta.insert(key.to_string(), v);
        }
    } else {
        let rest = strip_prefix_ci(text, "mailto:").unwrap_or(text);
        let (address, query) = rest.split_once('?').unwrap_or((rest, ""));
        meta.insert("email".to_string(), decode_component(address));
        for (k, v) in parse_query(query) {
            if k == "subject" || k == "body" {
                meta.insert(k, v);
            }
        }
    }
    meta.get("email").cloned()
}

fn parse_sms(text: &str, meta: &mut BTreeMap<String, String>) -> Option<String> {
    let (number, message) = if let Some(rest) = strip_prefix_ci(text, "smsto:") {
        let (n, m) = rest.split_once(':').unwrap_or((rest, ""));
        (n.to_string(), m.to_string())
    } else {
        let rest = strip_prefix_ci(text, "sms:").unwrap_or(text);
        let (n, q) = rest.split_once('?').unwrap_or((rest, ""));
        (n.to_string(), parse_query(q).remove("body").unwrap_or_default())
    };
    if !message.is_empty() {
        meta.insert("message".to_string(), message);
    }
    meta.insert("number".to_string(), number.clone());
    Some(number)
}

fn parse_geo(text: &str, meta: &mut BTreeMap<String, String>) -> Option<String> {
    let rest = strip_prefix_ci(text, "geo:")?;
    let coords = rest.split(['?', ';']).next()?;
    let mut parts = coords.split(',').map(str::trim);
    let lat = parts.next().filter(|v| v.parse::<f64>().is_ok())?;
    let lon = parts.next().filter(|v| v.parse::<f64>().is_ok())?;
    meta.insert("latitude".to_string(), lat.to_string());
    meta.insert("longitude".to_string(), lon.to_string());
    Some(format!("{lat}, {lon}"))
}

fn parse_crypto(text: &str, meta: &mut BTreeMap<String, String>) -> Option<String> {
    let (scheme, rest) = text.split_once(':')?;
    let (address, query) = rest.split_once('?').unwrap_or((rest, ""));
    let params = parse_query(query);
    meta.insert("currency".to_string(), scheme.to_ascii_lowercase());
    meta.insert("address".to_string(), address.to_string());
    if let Some(amount) = params.get("amount").or_else(|| params.get("value")) {
        meta.insert("amount".to_string(), amount.clone());
    }
    Some(address.to_string())
}
