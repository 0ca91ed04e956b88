use std::error::Error;

use qrcraft::{BlankRenderer, CodeBuilder, CodeError, ECLevel};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut builder = CodeBuilder::from_id("wifi")?;
    builder
        .value("ssid", "CoffeeShop")
        .value("password", "short") // too short for WPA/WPA2
        .ec_level(ECLevel::Q);

    if let Err(CodeError::Validation(errs)) = builder.compose() {
        for (key, msg) in errs {
            println!("{key}: {msg}");
        }
    }

    builder.value("password", "latte-art-2024");
    let report = builder.capacity_report();
    println!("Using {:.1}% of {} characters", report.percentage, report.capacity);

    // Swap BlankRenderer for a real symbol renderer to get a scannable image
    let generated = builder.render(&BlankRenderer)?;
    println!("Payload: {}", generated.content());
    println!("Builder: {}", builder.metadata());
    Ok(())
}
