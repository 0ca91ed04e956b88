//! Built-in template registry.
//!
//! The catalog is static data in display order. Ids are unique across the
//! whole catalog and every template's default format is one of its allowed
//! formats; both are checked by the tests below rather than at runtime.

use crate::common::{BarcodeFormat, CodeError, CodeResult};

use super::formatters::business::{CRYPTO_CURRENCIES, PAYPAL_CURRENCIES};
use super::formatters::social::{APP_STORES, SOCIAL_PLATFORMS};
use super::formatters::{
    business, communication, documents, general, location, product, social, tickets,
};
use super::FieldType::*;
use super::{Category, FieldDefinition as Field, Template, ValidationRule};

const TWO_D: &[BarcodeFormat] = &[
    BarcodeFormat::QrCode,
    BarcodeFormat::Aztec,
    BarcodeFormat::DataMatrix,
    BarcodeFormat::Pdf417,
];

const WIFI_ENCRYPTIONS: &[&str] = &["WPA/WPA2", "WPA3", "WEP", "None"];

static TEMPLATES: [Template; 24] = [
    // General
    Template {
        id: "text",
        name: "Text",
        description: "Plain text message",
        category: Category::General,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[Field::new("text", "Text", Multiline)
            .required()
            .placeholder("Hello from qrcraft")
            .rule(ValidationRule::MaxLength(2000))],
        formatter: general::text,
    },
    Template {
        id: "url",
        name: "Website",
        description: "Link to a web page",
        category: Category::General,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[Field::new("url", "URL", Url)
            .required()
            .placeholder("https://example.com")
            .helper("https:// is added when missing")],
        formatter: general::url,
    },
    Template {
        id: "wifi",
        name: "WiFi Network",
        description: "Join a wireless network by scanning",
        category: Category::General,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("ssid", "Network name", Text).required().placeholder("HomeNetwork"),
            Field::new("password", "Password", Text).placeholder("password123"),
            Field::new("encryption", "Security", Dropdown)
                .required()
                .options(WIFI_ENCRYPTIONS)
                .default_value("WPA/WPA2"),
            Field::new("hidden", "Hidden network", Checkbox).default_value("false"),
        ],
        formatter: general::wifi,
    },
    // Communication
    Template {
        id: "phone",
        name: "Phone Call",
        description: "Dial a phone number",
        category: Category::Communication,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[Field::new("phone", "Phone number", Phone)
            .required()
            .placeholder("+1 555 123 4567")],
        formatter: communication::phone,
    },
    Template {
        id: "email",
        name: "Email",
        description: "Compose an email",
        category: Category::Communication,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("email", "Email address", Email).required().placeholder("name@example.com"),
            Field::new("subject", "Subject", Text).placeholder("Hello"),
            Field::new("body", "Message", Multiline).placeholder("Looking forward to it"),
        ],
        formatter: communication::email,
    },
    Template {
        id: "sms",
        name: "SMS",
        description: "Send a text message",
        category: Category::Communication,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("phone", "Phone number", Phone).required().placeholder("+1 555 123 4567"),
            Field::new("message", "Message", Multiline)
                .placeholder("On my way")
                .rule(ValidationRule::MaxLength(160)),
        ],
        formatter: communication::sms,
    },
    Template {
        id: "whatsapp",
        name: "WhatsApp",
        description: "Start a WhatsApp chat",
        category: Category::Communication,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("phone", "Phone number", Phone)
                .required()
                .placeholder("+1 555 123 4567")
                .helper("Include the country code"),
            Field::new("message", "Message", Multiline).placeholder("Hi!"),
        ],
        formatter: communication::whatsapp,
    },
    // Social & web
    Template {
        id: "social",
        name: "Social Profile",
        description: "Link to a social media profile",
        category: Category::SocialWeb,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("platform", "Platform", Dropdown)
                .required()
                .options(SOCIAL_PLATFORMS)
                .default_value("Instagram"),
            Field::new("username", "Username", Text).required().placeholder("qrcraft"),
        ],
        formatter: social::social,
    },
    Template {
        id: "app_link",
        name: "App Download",
        description: "Open an app store listing",
        category: Category::SocialWeb,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("store", "Store", Dropdown)
                .required()
                .options(APP_STORES)
                .default_value("App Store"),
            Field::new("app_id", "App ID", Text)
                .required()
                .placeholder("id284882215")
                .helper("Numeric App Store id or Android package name"),
        ],
        formatter: social::app_link,
    },
    // Location & events
    Template {
        id: "location",
        name: "Location",
        description: "Open a map at coordinates",
        category: Category::LocationEvents,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("latitude", "Latitude", Number).required().placeholder("40.7128"),
            Field::new("longitude", "Longitude", Number).required().placeholder("-74.0060"),
        ],
        formatter: location::geo,
    },
    Template {
        id: "event",
        name: "Calendar Event",
        description: "Add an event to a calendar",
        category: Category::LocationEvents,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("title", "Title", Text).required().placeholder("Team meeting"),
            Field::new("start_date", "Start date", Date).required().placeholder("2024-05-01"),
            Field::new("start_time", "Start time", Time).placeholder("09:00"),
            Field::new("end_date", "End date", Date).placeholder("2024-05-01"),
            Field::new("end_time", "End time", Time).placeholder("10:00"),
            Field::new("location", "Location", Text).placeholder("Room 4"),
            Field::new("description", "Description", Multiline).placeholder("Quarterly planning"),
        ],
        formatter: location::event,
    },
    // Business
    Template {
        id: "vcard",
        name: "Contact Card",
        description: "Share contact details as a vCard",
        category: Category::Business,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("name", "Full name", Text).required().placeholder("Jane Doe"),
            Field::new("organization", "Organization", Text).placeholder("Acme Inc."),
            Field::new("title", "Job title", Text).placeholder("Engineer"),
            Field::new("phone", "Phone", Phone).placeholder("+1 555 123 4567"),
            Field::new("email", "Email", Email).placeholder("jane@example.com"),
            Field::new("website", "Website", Url).placeholder("https://example.com"),
            Field::new("address", "Address", Multiline).placeholder("1 Main St, Springfield"),
            Field::new("note", "Note", Multiline),
        ],
        formatter: business::vcard,
    },
    Template {
        id: "mecard",
        name: "MeCard",
        description: "Compact contact card",
        category: Category::Business,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("name", "Name", Text).required().placeholder("Jane Doe"),
            Field::new("phone", "Phone", Phone).placeholder("+1 555 123 4567"),
            Field::new("email", "Email", Email).placeholder("jane@example.com"),
            Field::new("website", "Website", Url).placeholder("https://example.com"),
            Field::new("address", "Address", Text).placeholder("1 Main St, Springfield"),
        ],
        formatter: business::mecard,
    },
    Template {
        id: "crypto",
        name: "Crypto Payment",
        description: "Request a cryptocurrency payment",
        category: Category::Business,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("currency", "Currency", Dropdown)
                .required()
                .options(CRYPTO_CURRENCIES)
                .default_value("Bitcoin"),
            Field::new("address", "Wallet address", Text)
                .required()
                .placeholder("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq")
                .rule(ValidationRule::MinLength(20)),
            Field::new("amount", "Amount", Number).placeholder("0.001"),
        ],
        formatter: business::crypto,
    },
    Template {
        id: "paypal",
        name: "PayPal",
        description: "PayPal.me payment link",
        category: Category::Business,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("username", "PayPal.me username", Text).required().placeholder("janedoe"),
            Field::new("amount", "Amount", Number).placeholder("10.00"),
            Field::new("currency", "Currency", Dropdown)
                .options(PAYPAL_CURRENCIES)
                .default_value("USD"),
        ],
        formatter: business::paypal,
    },
    Template {
        id: "upi",
        name: "UPI Payment",
        description: "Unified Payments Interface request",
        category: Category::Business,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("vpa", "UPI ID", Text).required().placeholder("jane@okbank").rule(
                ValidationRule::Pattern {
                    regex: r"^[A-Za-z0-9._\-]{2,256}@[A-Za-z]{2,64}$",
                    message: "Enter a UPI ID like name@bank",
                },
            ),
            Field::new("payee_name", "Payee name", Text).required().placeholder("Jane Doe"),
            Field::new("amount", "Amount", Number).placeholder("250"),
            Field::new("note", "Note", Text).placeholder("Groceries"),
        ],
        formatter: business::upi,
    },
    // Product
    Template {
        id: "ean13",
        name: "EAN-13 Product",
        description: "International retail product number",
        category: Category::Product,
        default_format: BarcodeFormat::Ean13,
        allowed_formats: &[BarcodeFormat::Ean13],
        fields: &[Field::new("code", "Product number", Text)
            .required()
            .placeholder("400638133393")
            .helper("The check digit is added when the barcode is drawn")
            .rule(ValidationRule::Pattern {
                regex: r"^\d{12}$",
                message: "Enter the first 12 digits of the product number",
            })],
        formatter: product::product_number,
    },
    Template {
        id: "upca",
        name: "UPC-A Product",
        description: "North American retail product number",
        category: Category::Product,
        default_format: BarcodeFormat::UpcA,
        allowed_formats: &[BarcodeFormat::UpcA],
        fields: &[Field::new("code", "Product number", Text)
            .required()
            .placeholder("03600029145")
            .helper("The check digit is added when the barcode is drawn")
            .rule(ValidationRule::Pattern {
                regex: r"^\d{11}$",
                message: "Enter the first 11 digits of the product number",
            })],
        formatter: product::product_number,
    },
    Template {
        id: "ean8",
        name: "EAN-8 Product",
        description: "Short retail product number",
        category: Category::Product,
        default_format: BarcodeFormat::Ean8,
        allowed_formats: &[BarcodeFormat::Ean8],
        fields: &[Field::new("code", "Product number", Text)
            .required()
            .placeholder("9638507")
            .helper("The check digit is added when the barcode is drawn")
            .rule(ValidationRule::Pattern {
                regex: r"^\d{7}$",
                message: "Enter the first 7 digits of the product number",
            })],
        formatter: product::product_number,
    },
    Template {
        id: "code128",
        name: "Inventory Label",
        description: "Stock keeping unit or asset tag",
        category: Category::Product,
        default_format: BarcodeFormat::Code128,
        allowed_formats: &[
            BarcodeFormat::Code128,
            BarcodeFormat::Code39,
            BarcodeFormat::Code93,
            BarcodeFormat::QrCode,
            BarcodeFormat::DataMatrix,
        ],
        fields: &[Field::new("sku", "SKU", Text)
            .required()
            .placeholder("SKU-12345")
            .rule(ValidationRule::MaxLength(80))],
        formatter: product::inventory,
    },
    // Documents
    Template {
        id: "document_link",
        name: "Document Link",
        description: "Link to a hosted document",
        category: Category::Documents,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: TWO_D,
        fields: &[Field::new("url", "Document URL", Url)
            .required()
            .placeholder("https://example.com/manual.pdf")],
        formatter: documents::document_link,
    },
    Template {
        id: "text_document",
        name: "Text Document",
        description: "Embed a short document",
        category: Category::Documents,
        default_format: BarcodeFormat::Pdf417,
        allowed_formats: TWO_D,
        fields: &[
            Field::new("title", "Title", Text).placeholder("Memo"),
            Field::new("body", "Content", Multiline)
                .required()
                .placeholder("Deliveries move to Thursdays.")
                .rule(ValidationRule::MaxLength(1000)),
        ],
        formatter: documents::text_document,
    },
    // Tickets
    Template {
        id: "event_ticket",
        name: "Event Ticket",
        description: "Admission ticket for an event",
        category: Category::Tickets,
        default_format: BarcodeFormat::QrCode,
        allowed_formats: &[BarcodeFormat::QrCode, BarcodeFormat::Aztec, BarcodeFormat::Pdf417],
        fields: &[
            Field::new("event_name", "Event", Text).required().placeholder("RustConf"),
            Field::new("ticket_id", "Ticket number", Text).required().placeholder("TCK-000123"),
            Field::new("holder", "Holder", Text).placeholder("Jane Doe"),
            Field::new("date", "Date", Date).placeholder("2024-09-10"),
            Field::new("venue", "Venue", Text).placeholder("Montreal"),
            Field::new("seat", "Seat", Text).placeholder("B12"),
        ],
        formatter: tickets::event_ticket,
    },
    Template {
        id: "boarding_pass",
        name: "Boarding Pass",
        description: "Flight boarding pass",
        category: Category::Tickets,
        default_format: BarcodeFormat::Aztec,
        allowed_formats: &[BarcodeFormat::Aztec, BarcodeFormat::QrCode, BarcodeFormat::Pdf417],
        fields: &[
            Field::new("passenger", "Passenger", Text).required().placeholder("DOE/JANE"),
            Field::new("flight", "Flight", Text).required().placeholder("BA117").rule(
                ValidationRule::Pattern {
                    regex: r"^[A-Za-z0-9]{2}\d{1,4}$",
                    message: "Enter an airline code and flight number, like BA117",
                },
            ),
            Field::new("origin", "From", Text).required().placeholder("LHR").rule(
                ValidationRule::Pattern { regex: r"^[A-Za-z]{3}$", message: "Use a 3 letter airport code" },
            ),
            Field::new("destination", "To", Text).required().placeholder("JFK").rule(
                ValidationRule::Pattern { regex: r"^[A-Za-z]{3}$", message: "Use a 3 letter airport code" },
            ),
            Field::new("date", "Date", Date).placeholder("2024-05-01"),
            Field::new("seat", "Seat", Text).placeholder("14A"),
            Field::new("gate", "Gate", Text).placeholder("B7"),
        ],
        formatter: tickets::boarding_pass,
    },
];

// Lookup
//------------------------------------------------------------------------------

pub fn get_all_templates() -> &'static [Template] {
    &TEMPLATES
}

pub fn get_template_by_id(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Like [`get_template_by_id`], for flows that treat a missing template as an error.
pub fn find_template(id: &str) -> CodeResult<&'static Template> {
    get_template_by_id(id).ok_or_else(|| CodeError::TemplateNotFound(id.to_string()))
}

pub fn get_templates_by_category(category: Category) -> Vec<&'static Template> {
    TEMPLATES.iter().filter(|t| t.category == category).collect()
}

#[cfg(test)]
mod catalog_tests {
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::capacity::check_content;
    use crate::template::{Fields, FieldValues, FieldType};

    fn sample_value(field: &Field) -> Option<String> {
        let v = match field.field_type {
            Checkbox => "false",
            Dropdown if field.default_value.is_empty() => field.options[0],
            _ if !field.default_value.is_empty() => field.default_value,
            _ => field.placeholder,
        };
        (!v.is_empty()).then(|| v.to_string())
    }

    fn sample_values(template: &Template, required_only: bool) -> FieldValues {
        template
            .fields
            .iter()
            .filter(|f| f.required || !required_only)
            .filter_map(|f| sample_value(f).map(|v| (f.key.to_string(), v)))
            .collect()
    }

    #[test]
    fn test_formatters_read_declared_fields() {
        for t in get_all_templates() {
            let full = sample_values(t, false);
            let mut forms = vec![full.clone(), sample_values(t, true)];
            for f in t.fields.iter().filter(|f| f.field_type == FieldType::Dropdown) {
                for option in f.options {
                    let mut form = full.clone();
                    form.insert(f.key.to_string(), option.to_string());
                    forms.push(form);
                }
            }

            let reads = RefCell::new(BTreeSet::new());
            for form in &forms {
                let _ = (t.formatter)(&Fields::recording(form, &reads));
            }
            let declared: BTreeSet<_> = t.fields.iter().map(|f| f.key.to_string()).collect();
            let undeclared: Vec<_> = reads.borrow().difference(&declared).cloned().collect();
            assert!(undeclared.is_empty(), "{} reads undeclared keys {undeclared:?}", t.id);
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = get_all_templates().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), get_all_templates().len());
    }

    #[test]
    fn test_default_format_allowed() {
        for t in get_all_templates() {
            assert!(t.supports(t.default_format), "{} default format not allowed", t.id);
        }
    }

    #[test]
    fn test_field_keys_unique() {
        for t in get_all_templates() {
            let keys: HashSet<_> = t.fields.iter().map(|f| f.key).collect();
            assert_eq!(keys.len(), t.fields.len(), "duplicate field key in {}", t.id);
        }
    }

    #[test]
    fn test_options_iff_dropdown() {
        for t in get_all_templates() {
            for f in t.fields {
                assert_eq!(f.field_type == FieldType::Dropdown, !f.options.is_empty(), "{}.{}", t.id, f.key);
                if !f.default_value.is_empty() && f.field_type == FieldType::Dropdown {
                    assert!(f.options.contains(&f.default_value), "{}.{}", t.id, f.key);
                }
            }
        }
    }

    #[test]
    fn test_every_category_populated() {
        for c in Category::ALL {
            assert!(!get_templates_by_category(c).is_empty(), "{c} has no templates");
        }
    }

    #[test]
    fn test_required_only_formats_non_blank() {
        for t in get_all_templates() {
            let values = sample_values(t, true);
            let out = t.format(&values).unwrap_or_else(|e| panic!("{}: {e}", t.id));
            assert!(!out.trim().is_empty(), "{} produced blank output", t.id);
        }
    }

    #[test]
    fn test_samples_validate_and_fit() {
        for t in get_all_templates() {
            let values = sample_values(t, false);
            let errs = t.validate(&values);
            assert!(errs.is_empty(), "{}: {errs:?}", t.id);
            let out = t.format(&values).unwrap();
            for &format in t.allowed_formats {
                if format.is_2d() || format == t.default_format {
                    assert_eq!(check_content(&out, format, Default::default()), Ok(()), "{} {format}", t.id);
                }
            }
        }
    }

    #[test]
    fn test_formatter_idempotent() {
        for t in get_all_templates() {
            let values = sample_values(t, false);
            assert_eq!(t.format(&values), t.format(&values), "{}", t.id);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(get_template_by_id("wifi").map(|t| t.name), Some("WiFi Network"));
        assert!(get_template_by_id("does_not_exist").is_none());
        assert_eq!(
            find_template("nope").unwrap_err(),
            CodeError::TemplateNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_by_category_keeps_order() {
        let ids: Vec<_> = get_templates_by_category(Category::Communication).iter().map(|t| t.id).collect();
        assert_eq!(ids, ["phone", "email", "sms", "whatsapp"]);
        let ids: Vec<_> = get_templates_by_category(Category::Product).iter().map(|t| t.id).collect();
        assert_eq!(ids, ["ean13", "upca", "ean8", "code128"]);
    }
}
