use crate::common::CodeResult;

use super::{query, Fields};

pub fn phone(fields: &Fields) -> CodeResult<String> {
    let number = fields.require("phone")?;
    if number.to_ascii_lowercase().starts_with("tel:") {
        Ok(number.to_string())
    } else {
        Ok(format!("tel:{number}"))
    }
}

/// `mailto:` with percent-encoded subject and body, so `&`, `#` and `?` in
/// the text stay inside their parameter.
pub fn email(fields: &Fields) -> CodeResult<String> {
    let address = fields.require("email")?;
    let subject = fields.raw("subject").map(urlencoding::encode);
    let body = fields.raw("body").map(urlencoding::encode);
    let params = query(&[("subject", subject.as_deref()), ("body", body.as_deref())]);
    Ok(format!("mailto:{address}{params}"))
}

pub fn sms(fields: &Fields) -> CodeResult<String> {
    let number = fields.require("phone")?;
    let message = fields.raw("message").unwrap_or("");
    Ok(format!("smsto:{number}:{message}"))
}

/// wa.me links take the number as bare digits, country code included.
pub fn whatsapp(fields: &Fields) -> CodeResult<String> {
    let number: String = fields.require("phone")?.chars().filter(char::is_ascii_digit).collect();
    let text = fields.raw("message").map(urlencoding::encode);
    let params = query(&[("text", text.as_deref())]);
    Ok(format!("https://wa.me/{number}{params}"))
}
