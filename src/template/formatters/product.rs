use crate::common::CodeResult;

use super::Fields;

/// Retail product numbers; spaces and dashes typed by users are dropped.
pub fn product_number(fields: &Fields) -> CodeResult<String> {
    let code = fields.require("code")?;
    Ok(code.chars().filter(|c| !matches!(c, ' ' | '-')).collect())
}

/// Free-form inventory code, upper-cased so it stays valid for Code 39.
pub fn inventory(fields: &Fields) -> CodeResult<String> {
    fields.require("sku").map(str::to_uppercase)
}

#[cfg(test)]
mod product_tests {
    use crate::template::{get_template_by_id, FieldValues};

    fn format(id: &str, pairs: &[(&str, &str)]) -> String {
        let values: FieldValues =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        get_template_by_id(id).unwrap().format(&values).unwrap()
    }

    #[test]
    fn test_product_number() {
        assert_eq!(format("ean13", &[("code", "4 006381-333931")]), "4006381333931");
        assert_eq!(format("ean8", &[("code", "9638507")]), "9638507");
        assert_eq!(format("upca", &[("code", "03600029145")]), "03600029145");
    }

    #[test]
    fn test_inventory() {
        assert_eq!(format("code128", &[("sku", "bin-42/a")]), "BIN-42/A");
    }
}
