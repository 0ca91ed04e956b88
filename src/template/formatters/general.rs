use crate::common::CodeResult;

use super::Fields;

/// Prefixes `https://` unless an http(s) scheme is already present.
pub fn normalize_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

pub fn text(fields: &Fields) -> CodeResult<String> {
    fields.require_raw("text").map(str::to_string)
}

pub fn url(fields: &Fields) -> CodeResult<String> {
    fields.require("url").map(normalize_url)
}

/// Encryption label of the WiFi form mapped to the `T:` token.
pub fn wifi_auth_type(encryption: &str) -> &'static str {
    match encryption {
        "WPA/WPA2" | "WPA" | "WPA2" => "WPA",
        "WPA3" => "SAE",
        "WEP" => "WEP",
        _ => "nopass",
    }
}

/// Backslash-escapes the characters that delimit `WIFI:` fields.
pub fn escape_wifi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn wifi(fields: &Fields) -> CodeResult<String> {
    let ssid = escape_wifi(fields.require_raw("ssid")?);
    let auth = wifi_auth_type(fields.get_or("encryption", ""));
    let password = escape_wifi(fields.raw("password").unwrap_or(""));
    let hidden = fields.flag("hidden");
    Ok(format!("WIFI:T:{auth};S:{ssid};P:{password};H:{hidden};;"))
}

#[cfg(test)]
mod general_tests {
    use test_case::test_case;

    use super::{escape_wifi, normalize_url, wifi_auth_type};
    use crate::common::BarcodeFormat;
    use crate::reader::ScannedContent;
    use crate::template::{get_template_by_id, FieldValues};

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test_case("example.com", "https://example.com"; "bare host")]
    #[test_case("http://x.com", "http://x.com"; "http kept")]
    #[test_case("https://x.com/a", "https://x.com/a"; "https kept")]
    #[test_case("HTTPS://X.COM", "HTTPS://X.COM"; "uppercase scheme kept")]
    #[test_case("ftp.example.com", "https://ftp.example.com"; "ftp host")]
    fn test_normalize_url(input: &str, exp: &str) {
        assert_eq!(normalize_url(input), exp);
    }

    #[test]
    fn test_url_template() {
        let t = get_template_by_id("url").unwrap();
        assert_eq!(t.format(&values(&[("url", "example.com")])).unwrap(), "https://example.com");
        assert_eq!(t.format(&values(&[("url", "http://x.com")])).unwrap(), "http://x.com");
    }

    #[test_case("WPA/WPA2", "WPA"; "wpa")]
    #[test_case("WPA3", "SAE"; "wpa3")]
    #[test_case("WEP", "WEP"; "wep")]
    #[test_case("None", "nopass"; "open")]
    #[test_case("", "nopass"; "missing")]
    fn test_wifi_auth_type(encryption: &str, exp: &str) {
        assert_eq!(wifi_auth_type(encryption), exp);
    }

    #[test]
    fn test_wifi() {
        let t = get_template_by_id("wifi").unwrap();
        let v = values(&[
            ("ssid", "Home"),
            ("password", "password123"),
            ("encryption", "WPA/WPA2"),
            ("hidden", "false"),
        ]);
        assert_eq!(t.format(&v).unwrap(), "WIFI:T:WPA;S:Home;P:password123;H:false;;");
    }

    #[test_case("Home", "Home"; "plain")]
    #[test_case("Cafe;Bar", r"Cafe\;Bar"; "semicolon")]
    #[test_case(r#"a:b,c"d\e"#, r#"a\:b\,c\"d\\e"#; "every special")]
    fn test_escape_wifi(input: &str, exp: &str) {
        assert_eq!(escape_wifi(input), exp);
    }

    #[test]
    fn test_wifi_escapes_and_reads_back() {
        let t = get_template_by_id("wifi").unwrap();
        let v = values(&[
            ("ssid", "Cafe;Bar"),
            ("password", "pa:ss;word1"),
            ("encryption", "WPA/WPA2"),
            ("hidden", "false"),
        ]);
        let payload = t.format(&v).unwrap();
        assert_eq!(payload, r"WIFI:T:WPA;S:Cafe\;Bar;P:pa\:ss\;word1;H:false;;");

        let scanned = ScannedContent::parse(&payload, BarcodeFormat::QrCode);
        assert_eq!(scanned.metadata["ssid"], "Cafe;Bar");
        assert_eq!(scanned.metadata["password"], "pa:ss;word1");
    }

    #[test]
    fn test_wifi_keeps_password_whitespace() {
        let t = get_template_by_id("wifi").unwrap();
        let v = values(&[("ssid", "Home"), ("password", "  secret12  "), ("encryption", "WPA/WPA2")]);
        assert_eq!(t.format(&v).unwrap(), "WIFI:T:WPA;S:Home;P:  secret12  ;H:false;;");
        assert!(t.validate(&v).is_empty());
    }

    #[test]
    fn test_wifi_hidden_open() {
        let t = get_template_by_id("wifi").unwrap();
        let v = values(&[("ssid", "Cafe"), ("encryption", "None"), ("hidden", "true")]);
        assert_eq!(t.format(&v).unwrap(), "WIFI:T:nopass;S:Cafe;P:;H:true;;");
    }

    #[test]
    fn test_text() {
        let t = get_template_by_id("text").unwrap();
        assert_eq!(t.format(&values(&[("text", "Hello, world!")])).unwrap(), "Hello, world!");
        assert!(t.format(&values(&[("text", " ")])).is_err());
    }
}
