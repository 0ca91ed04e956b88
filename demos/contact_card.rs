use std::error::Error;

use qrcraft::{get_template_by_id, BarcodeFormat, CodeBuilder, CodeError};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let template = get_template_by_id("vcard").ok_or(CodeError::TemplateNotFound("vcard".into()))?;
    for field in template.fields {
        println!("{:<14} {}{}", field.key, field.label, if field.required { " *" } else { "" });
    }

    let code = CodeBuilder::new(template)
        .values([
            ("name", "Ada Lovelace"),
            ("organization", "Analytical Engines Ltd"),
            ("phone", "+44 20 7946 0000"),
            ("email", "ada@example.com"),
        ])
        .format(BarcodeFormat::DataMatrix)
        .compose()?;
    println!("\n{}", code.content);

    let record = code.to_record();
    println!("\n{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
