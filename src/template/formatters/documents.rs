use crate::common::CodeResult;

use super::general::normalize_url;
use super::Fields;

pub fn document_link(fields: &Fields) -> CodeResult<String> {
    fields.require("url").map(normalize_url)
}

/// Title, blank line, then body. Without a title the body stands alone.
pub fn text_document(fields: &Fields) -> CodeResult<String> {
    let body = fields.require_raw("body")?;
    Ok(match fields.get("title") {
        Some(title) => format!("{title}\n\n{body}"),
        None => body.to_string(),
    })
}
