use crate::common::CodeResult;

use super::{push_line, query, Fields};

pub const CRYPTO_CURRENCIES: &[&str] = &["Bitcoin", "Ethereum", "Other"];

pub const PAYPAL_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CAD", "AUD", "JPY", "INR"];

pub fn vcard(fields: &Fields) -> CodeResult<String> {
    let name = fields.require("name")?;
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string(), format!("FN:{name}")];
    push_line(&mut lines, "ORG:", fields.get("organization"));
    push_line(&mut lines, "TITLE:", fields.get("title"));
    push_line(&mut lines, "TEL:", fields.get("phone"));
    push_line(&mut lines, "EMAIL:", fields.get("email"));
    push_line(&mut lines, "URL:", fields.get("website"));
    if let Some(address) = fields.get("address") {
        lines.push(format!("ADR:;;{address};;;;"));
    }
    push_line(&mut lines, "NOTE:", fields.raw("note"));
    lines.push("END:VCARD".to_string());
    Ok(lines.join("\n"))
}

pub fn mecard(fields: &Fields) -> CodeResult<String> {
    let name = fields.require("name")?;
    let mut out = format!("MECARD:N:{name};");
    for (tag, key) in [("TEL", "phone"), ("EMAIL", "email"), ("URL", "website"), ("ADR", "address")] {
        if let Some(v) = fields.get(key) {
            out.push_str(&format!("{tag}:{v};"));
        }
    }
    out.push(';');
    Ok(out)
}

pub fn crypto(fields: &Fields) -> CodeResult<String> {
    let address = fields.require("address")?;
    let amount = fields.get("amount");
    Ok(match fields.get_or("currency", "").to_lowercase().as_str() {
        "bitcoin" => format!("bitcoin:{address}{}", query(&[("amount", amount)])),
        "ethereum" => format!("ethereum:{address}{}", query(&[("value", amount)])),
        _ => address.to_string(),
    })
}

pub fn paypal(fields: &Fields) -> CodeResult<String> {
    let username = fields.require("username")?.trim_start_matches('@');
    Ok(match fields.get("amount") {
        Some(amount) => {
            format!("https://paypal.me/{username}/{amount}{}", fields.get_or("currency", "USD"))
        }
        None => format!("https://paypal.me/{username}"),
    })
}

pub fn upi(fields: &Fields) -> CodeResult<String> {
    let vpa = fields.require("vpa")?;
    let name = urlencoding::encode(fields.require("payee_name")?);
    let note = fields.get("note").map(urlencoding::encode);
    let mut out = format!("upi://pay?pa={vpa}&pn={name}");
    if let Some(amount) = fields.get("amount") {
        out.push_str(&format!("&am={amount}"));
    }
    if let Some(note) = note {
        out.push_str(&format!("&tn={note}"));
    }
    out.push_str("&cu=INR");
    Ok(out)
}
